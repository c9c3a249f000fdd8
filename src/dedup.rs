//! Collapsing records that share a competitor name.

use indexmap::IndexMap as IndexMapRaw;
use indexmap::map::Entry;

use crate::render::CorrelatedRow;

type IndexMap<K, V> = IndexMapRaw<K, V, hashbrown::DefaultHashBuilder>;

/// Keeps one record per competitor name, last write wins.
///
/// A replaced record keeps the position at which its name was first seen, so
/// output order follows first occurrence while values follow the latest row.
#[derive(Debug, Clone)]
pub struct Deduplicator<R> {
    records: IndexMap<String, R>,
    replaced: usize,
}

impl<R> Default for Deduplicator<R> {
    fn default() -> Self {
        Self {
            records: IndexMap::default(),
            replaced: 0,
        }
    }
}

impl<R: CorrelatedRow> Deduplicator<R> {
    /// Create an empty deduplicator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record`, replacing any earlier record with the same name.
    ///
    /// Returns `true` when an earlier record was replaced.
    pub fn insert(&mut self, record: R) -> bool {
        match self.records.entry(record.competitor_name().to_owned()) {
            Entry::Occupied(mut slot) => {
                slot.insert(record);
                self.replaced += 1;
                true
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
                false
            }
        }
    }

    /// Number of distinct names held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How many inserts replaced an earlier record.
    #[must_use]
    pub fn replaced(&self) -> usize {
        self.replaced
    }

    /// The retained records, in first-seen order.
    #[must_use]
    pub fn into_records(self) -> Vec<R> {
        self.records.into_values().collect()
    }
}
