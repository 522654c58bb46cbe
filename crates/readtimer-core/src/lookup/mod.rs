//! External book-metadata lookup.
//!
//! The provider's wire protocol is encapsulated here; the rest of the core
//! only sees ranked [`BookCandidate`] lists. Lookup is the system's single
//! asynchronous boundary.

mod client;
mod suggestions;

pub use client::{BookCandidate, BookLookupClient, DEFAULT_ENDPOINT, MIN_QUERY_LEN};
pub use suggestions::SuggestionBox;
