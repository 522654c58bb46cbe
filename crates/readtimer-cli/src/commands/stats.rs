use clap::Subcommand;
use serde::Serialize;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's stats
    Today,
    /// All-time stats
    All,
}

#[derive(Serialize)]
struct AllTimeStats {
    total_reading_min: u64,
    finished_books: u64,
    books_tracked: usize,
    days_logged: usize,
    minutes_logged: u64,
    notes: usize,
    goals: usize,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = super::open_tracker()?;

    match action {
        StatsAction::Today => {
            let stats = tracker.stats();
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::All => {
            let stats = tracker.stats();
            let all = AllTimeStats {
                total_reading_min: stats.total_reading_secs / 60,
                finished_books: stats.finished_books,
                books_tracked: tracker.catalog().len(),
                days_logged: tracker.ledger().len(),
                minutes_logged: tracker.ledger().total_minutes(),
                notes: tracker.notes().len(),
                goals: tracker.goals().len(),
            };
            println!("{}", serde_json::to_string_pretty(&all)?);
        }
    }
    Ok(())
}
