use clap::{Subcommand, ValueEnum};
use readtimer_core::{BookStatus, SessionOutcome};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Reading,
    Finished,
    ToRead,
}

impl From<StatusArg> for BookStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Reading => BookStatus::Reading,
            StatusArg::Finished => BookStatus::Finished,
            StatusArg::ToRead => BookStatus::ToRead,
        }
    }
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Merge a completed session into the book catalog
    Save {
        /// Book title (existing titles merge, new titles create a record)
        #[arg(long)]
        title: String,
        /// Pages read this session
        #[arg(long, default_value = "0")]
        pages: String,
        /// Author for a newly created record
        #[arg(long)]
        author: Option<String>,
        /// Total pages for a newly created record
        #[arg(long)]
        total_pages: Option<String>,
        /// Session note, appended to the book's notes
        #[arg(long, default_value = "")]
        note: String,
        /// Reading status to apply
        #[arg(long, value_enum, default_value = "reading")]
        status: StatusArg,
        /// Minutes to log against the ledger (for sessions not driven
        /// by the timer)
        #[arg(long)]
        minutes: Option<String>,
        /// Calendar day to log against, defaults to today
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },
}

/// Numeric form fields coerce to zero instead of failing.
fn parse_or_zero(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = super::open_tracker()?;

    match action {
        SessionAction::Save {
            title,
            pages,
            author,
            total_pages,
            note,
            status,
            minutes,
            date,
        } => {
            let day = date.unwrap_or_else(|| chrono::Utc::now().date_naive());
            let total_pages = total_pages
                .as_deref()
                .map(parse_or_zero)
                .filter(|&n| n > 0);

            let mut events = Vec::new();
            if let Some(minutes) = minutes.as_deref().map(parse_or_zero).filter(|&n| n > 0) {
                events.extend(tracker.record_session_on(day, u64::from(minutes) * 60)?);
            }

            let (record, reconcile_events) = tracker.save_reading_on(
                day,
                SessionOutcome {
                    title,
                    author,
                    total_pages,
                    pages_delta: parse_or_zero(&pages),
                    note,
                    status: status.into(),
                },
            )?;
            events.extend(reconcile_events);

            println!("{}", serde_json::to_string_pretty(&record)?);
            if !events.is_empty() {
                println!("{}", serde_json::to_string_pretty(&events)?);
            }
        }
    }
    Ok(())
}
