//! Title-based identity lookup over the book catalog.
//!
//! Merge identity is the title string: exact, case-sensitive. Duplicate
//! titles are tolerated in the catalog; the policy below decides which
//! record a lookup resolves to.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::BookRecord;

/// How a title that appears on several records resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The record with the lowest catalog position wins.
    #[default]
    FirstMatch,
}

/// Index from title to catalog position, built per reconciliation.
#[derive(Debug)]
pub struct TitleIndex {
    positions: HashMap<String, usize>,
    policy: DuplicatePolicy,
}

impl TitleIndex {
    pub fn build(catalog: &[BookRecord], policy: DuplicatePolicy) -> Self {
        let mut positions = HashMap::with_capacity(catalog.len());
        for (pos, record) in catalog.iter().enumerate() {
            match policy {
                DuplicatePolicy::FirstMatch => {
                    positions.entry(record.title.clone()).or_insert(pos);
                }
            }
        }
        Self { positions, policy }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Catalog position of the record owning `title`, if any.
    pub fn resolve(&self, title: &str) -> Option<usize> {
        self.positions.get(title).copied()
    }
}
