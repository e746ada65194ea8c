//! Deciding which listings are new since the previous poll cycle.
//!
//! Identity is the record URL, compared byte for byte. Records without a URL
//! have no identity and therefore count as new on every cycle.

use std::collections::HashSet;

use crate::record::ListingRecord;

/// Returns the records of `current` whose URL does not occur in `previous`.
///
/// Order of `current` is preserved.
pub fn uncached<'a>(previous: &[ListingRecord], current: &'a [ListingRecord]) -> Vec<&'a ListingRecord> {
    let seen: HashSet<&str> = previous.iter().map(|r| r.url.as_str()).filter(|url| !url.is_empty()).collect();

    current
        .iter()
        .filter(|record| record.url.is_empty() || !seen.contains(record.url.as_str()))
        .collect()
}

/// The listings reported by the previous cycle.
///
/// Owned by the poll loop. Each call to [`observe`](SeenListings::observe)
/// replaces the remembered set wholesale; nothing accumulates across cycles.
#[derive(Debug, Clone, Default)]
pub struct SeenListings {
    previous: Vec<ListingRecord>,
}

impl SeenListings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records this cycle's listings and returns those absent last cycle.
    pub fn observe(&mut self, current: Vec<ListingRecord>) -> Vec<ListingRecord> {
        let fresh = uncached(&self.previous, &current).into_iter().cloned().collect();
        self.previous = current;
        fresh
    }

    /// Listings remembered from the last cycle.
    pub fn previous(&self) -> &[ListingRecord] {
        &self.previous
    }
}
