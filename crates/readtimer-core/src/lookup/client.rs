//! Google Books volumes client.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::catalog::{DEFAULT_TOTAL_PAGES, UNKNOWN_AUTHOR};
use crate::error::LookupError;

/// Default provider endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// Suggestion queries shorter than this (after trimming) return empty
/// without issuing a request.
pub const MIN_QUERY_LEN: usize = 2;

/// One ranked lookup result, already mapped to catalog vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCandidate {
    pub title: String,
    pub author: String,
    pub page_count: u32,
}

/// HTTP client for the volumes endpoint.
///
/// The endpoint is configurable so tests can point it at a local mock
/// server.
#[derive(Debug, Clone)]
pub struct BookLookupClient {
    http: Client,
    endpoint: String,
}

impl Default for BookLookupClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BookLookupClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Search the provider for up to `max_results` candidates, ordered by
    /// provider relevance. An empty list is a valid, non-error result.
    ///
    /// # Errors
    /// Returns a [`LookupError`] on transport failure or a non-success
    /// status. Callers degrade every error to "no candidates".
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<BookCandidate>, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query), ("maxResults", &max_results.to_string())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body: serde_json::Value = resp.json().await?;
        Ok(parse_volumes(&body))
    }

    /// Search for typeahead suggestions. Queries below [`MIN_QUERY_LEN`]
    /// characters return empty without touching the network.
    pub async fn suggest(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<BookCandidate>, LookupError> {
        if query.trim().len() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        self.search(query, max_results).await
    }
}

/// Map a volumes response body to candidates. Items without a title are
/// skipped; missing authors and page counts take the catalog fallbacks.
fn parse_volumes(body: &serde_json::Value) -> Vec<BookCandidate> {
    body.get("items")
        .and_then(|items| items.as_array())
        .map(|items| items.iter().filter_map(volume_to_candidate).collect())
        .unwrap_or_default()
}

fn volume_to_candidate(item: &serde_json::Value) -> Option<BookCandidate> {
    let info = item.get("volumeInfo")?;
    let title = info.get("title")?.as_str()?.to_string();

    let author = info
        .get("authors")
        .and_then(|a| a.as_array())
        .map(|authors| {
            authors
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|joined| !joined.is_empty())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    let page_count = info
        .get("pageCount")
        .and_then(|n| n.as_u64())
        .filter(|&n| n > 0)
        .map(|n| n as u32)
        .unwrap_or(DEFAULT_TOTAL_PAGES);

    Some(BookCandidate {
        title,
        author,
        page_count,
    })
}
