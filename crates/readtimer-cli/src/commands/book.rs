use clap::Subcommand;
use readtimer_core::{BookLookupClient, Config};

use super::session::StatusArg;

#[derive(Subcommand)]
pub enum BookAction {
    /// List the book catalog
    List,
    /// Search the lookup provider and add the top match, unread
    Add {
        /// Free-text search query
        query: String,
    },
    /// Search the lookup provider and print ranked candidates
    Search {
        /// Free-text search query
        query: String,
    },
    /// Edit a book's fields
    Edit {
        /// Book id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        pages_read: Option<u32>,
        #[arg(long)]
        total_pages: Option<u32>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Replace a book's note
    Note {
        /// Book id
        id: String,
        /// New note text
        text: String,
    },
    /// Delete a book
    Delete {
        /// Book id
        id: String,
    },
}

/// Run a lookup, reducing every failure to "no candidates".
fn lookup(query: &str, max_results: u32) -> Vec<readtimer_core::BookCandidate> {
    let config = Config::load_or_default();
    let client = BookLookupClient::with_endpoint(config.lookup.endpoint.clone());
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(_) => return Vec::new(),
    };
    runtime
        .block_on(client.search(query, max_results))
        .unwrap_or_default()
}

pub fn run(action: BookAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = super::open_tracker()?;

    match action {
        BookAction::List => {
            println!("{}", serde_json::to_string_pretty(tracker.catalog())?);
        }
        BookAction::Add { query } => {
            match lookup(&query, 1).into_iter().next() {
                Some(candidate) => {
                    let (record, _) = tracker.add_book(candidate)?;
                    println!("{}", serde_json::to_string_pretty(&record)?);
                }
                None => println!("No books found for '{query}'."),
            }
        }
        BookAction::Search { query } => {
            let max = Config::load_or_default().lookup.max_suggestions;
            let candidates = lookup(&query, max);
            println!("{}", serde_json::to_string_pretty(&candidates)?);
        }
        BookAction::Edit {
            id,
            title,
            author,
            pages_read,
            total_pages,
            status,
        } => {
            let Some(mut record) = tracker.catalog().iter().find(|b| b.id == id).cloned() else {
                return Err(format!("no book with id {id}").into());
            };
            if let Some(title) = title {
                record.title = title;
            }
            if let Some(author) = author {
                record.author = author;
            }
            if let Some(pages_read) = pages_read {
                record.pages_read = pages_read;
            }
            if let Some(total_pages) = total_pages {
                record.total_pages = total_pages;
            }
            if let Some(status) = status {
                record.status = status.into();
            }
            tracker.update_book(record.clone())?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        BookAction::Note { id, text } => {
            tracker.set_book_note(&id, &text)?;
            println!("Note saved.");
        }
        BookAction::Delete { id } => {
            tracker.delete_book(&id)?;
            println!("Deleted.");
        }
    }
    Ok(())
}
