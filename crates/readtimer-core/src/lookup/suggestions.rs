//! Relevance tracking for in-flight lookups.
//!
//! Lookups have no cancellation primitive: a request that is no longer
//! wanted will still produce a response eventually. The box stamps each
//! request with a generation and drops any response whose generation is
//! no longer current - silently, with no error recorded.

use super::BookCandidate;

/// Holds the current suggestion list and the generation counter that
/// decides whether a late response still applies.
#[derive(Debug, Default)]
pub struct SuggestionBox {
    generation: u64,
    candidates: Vec<BookCandidate>,
}

impl SuggestionBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new lookup. Invalidates every outstanding request and
    /// clears the current list; returns the generation to hand back to
    /// [`accept`](Self::accept).
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.candidates.clear();
        self.generation
    }

    /// Apply a response if its generation is still current. Returns
    /// whether the response was applied; stale responses are ignored.
    pub fn accept(&mut self, generation: u64, candidates: Vec<BookCandidate>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.candidates = candidates;
        true
    }

    /// Drop the current list and invalidate outstanding requests.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.candidates.clear();
    }

    pub fn candidates(&self) -> &[BookCandidate] {
        &self.candidates
    }

    /// Take ownership of the list, leaving the box empty.
    pub fn take(&mut self) -> Vec<BookCandidate> {
        std::mem::take(&mut self.candidates)
    }
}
