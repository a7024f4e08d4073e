//! The in-memory record store.
//!
//! [`RecordStore`] owns the two ordered record sequences. Append is the
//! only mutation; records are never updated or removed. Locking is the
//! caller's concern (see [`AppState`](crate::state::AppState)).

use happiness_types::{AggregateRecord, IndividualRecord, TimeRange};

use crate::seed::SeedData;

/// Individual and aggregate records in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    individual: Vec<IndividualRecord>,
    aggregate: Vec<AggregateRecord>,
}

impl RecordStore {
    /// An empty store.
    pub const fn new() -> Self {
        Self {
            individual: Vec::new(),
            aggregate: Vec::new(),
        }
    }

    /// A store pre-populated with seed data.
    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            individual: seed.individual,
            aggregate: seed.aggregate,
        }
    }

    /// Individual records whose timestamp falls inside `range`, in
    /// insertion order.
    pub fn list_individual(&self, range: &TimeRange) -> Vec<IndividualRecord> {
        range.filter(&self.individual)
    }

    /// Aggregate records whose timestamp falls inside `range`, in
    /// insertion order.
    pub fn list_aggregate(&self, range: &TimeRange) -> Vec<AggregateRecord> {
        range.filter(&self.aggregate)
    }

    /// Append an already-validated individual record and return it.
    pub fn append(&mut self, record: IndividualRecord) -> IndividualRecord {
        self.individual.push(record.clone());
        record
    }

    /// Number of stored individual records.
    pub const fn individual_len(&self) -> usize {
        self.individual.len()
    }

    /// Number of stored aggregate records.
    pub const fn aggregate_len(&self) -> usize {
        self.aggregate.len()
    }
}
