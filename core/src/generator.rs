//! Synthetic data generation: fixed-shape heavy records, produced lazily.

use crate::constants::{DESCRIPTION_FILL, DESCRIPTION_LEN, NAME_FILL, NAME_LEN};
use chrono::Utc;

/// One synthetic record. Roughly a kilobyte of payload per instance, which
/// is what makes the dump/stream contrast visible in the heap samples.
#[derive(Debug, Clone)]
pub struct HeavyRecord {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// RFC 3339 wall-clock time at the moment this record was produced,
    /// not at run start.
    pub timestamp: String,
}

/// Lazy, finite source of [`HeavyRecord`]s.
///
/// Each benchmark run constructs a fresh instance and consumes it fully;
/// nothing is cached or shared between runs, so two passes over the same
/// count are independent (their records differ only in `timestamp`).
pub struct HeavyRecords {
    next_id: u64,
    remaining: usize,
    name_len: usize,
    description_len: usize,
}

impl HeavyRecords {
    /// Source of `count` records with the standard field lengths.
    pub fn new(count: usize) -> Self {
        Self::with_field_lengths(count, NAME_LEN, DESCRIPTION_LEN)
    }

    /// Source with explicit field lengths. Lengths are fixed for the
    /// lifetime of the source.
    pub fn with_field_lengths(count: usize, name_len: usize, description_len: usize) -> Self {
        Self {
            next_id: 0,
            remaining: count,
            name_len,
            description_len,
        }
    }

    fn produce(&mut self) -> HeavyRecord {
        let record = HeavyRecord {
            id: self.next_id,
            name: NAME_FILL.repeat(self.name_len),
            description: DESCRIPTION_FILL.repeat(self.description_len),
            timestamp: Utc::now().to_rfc3339(),
        };
        self.next_id += 1;
        record
    }
}

impl Iterator for HeavyRecords {
    type Item = HeavyRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.produce())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for HeavyRecords {}
