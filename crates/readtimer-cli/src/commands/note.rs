use clap::Subcommand;

#[derive(Subcommand)]
pub enum NoteAction {
    /// List journaled session notes
    List,
    /// Delete a note by list position
    Delete {
        /// Zero-based position in the list
        index: usize,
    },
}

pub fn run(action: NoteAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = super::open_tracker()?;

    match action {
        NoteAction::List => {
            println!("{}", serde_json::to_string_pretty(tracker.notes())?);
        }
        NoteAction::Delete { index } => match tracker.delete_note(index)? {
            Some(removed) => println!("{}", serde_json::to_string_pretty(&removed)?),
            None => return Err(format!("no note at index {index}").into()),
        },
    }
    Ok(())
}
