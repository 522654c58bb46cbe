use clap::Subcommand;
use readtimer_core::GoalKind;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a reading goal
    Add {
        /// Goal description
        text: String,
        /// Target: minutes for time goals, count for book goals
        #[arg(long)]
        target: u32,
        /// Count finished books instead of minutes read
        #[arg(long)]
        books: bool,
        /// Measure today's reading instead of the running total
        #[arg(long)]
        daily: bool,
    },
    /// List goals with current progress
    List,
    /// Flip a goal's completion flag (overwritten at the next recompute)
    Toggle {
        /// Goal id
        id: i64,
    },
    /// Delete a goal
    Delete {
        /// Goal id
        id: i64,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = super::open_tracker()?;

    match action {
        GoalAction::Add {
            text,
            target,
            books,
            daily,
        } => {
            let kind = if books { GoalKind::Books } else { GoalKind::Time };
            let goal = tracker.add_goal(text, kind, target, daily)?;
            println!("{}", serde_json::to_string_pretty(&goal)?);
        }
        GoalAction::List => {
            println!("{}", serde_json::to_string_pretty(tracker.goals())?);
        }
        GoalAction::Toggle { id } => match tracker.toggle_goal(id)? {
            Some(completed) => println!("{{\"id\": {id}, \"completed\": {completed}}}"),
            None => return Err(format!("no goal with id {id}").into()),
        },
        GoalAction::Delete { id } => {
            tracker.delete_goal(id)?;
            println!("Deleted.");
        }
    }
    Ok(())
}
