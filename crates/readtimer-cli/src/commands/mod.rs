pub mod book;
pub mod config;
pub mod goal;
pub mod note;
pub mod session;
pub mod stats;
pub mod timer;

use readtimer_core::{ReadingTracker, SqliteStore};

/// Open the default store and load the tracker over it.
pub fn open_tracker() -> Result<ReadingTracker<SqliteStore>, Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    Ok(ReadingTracker::new(store))
}
