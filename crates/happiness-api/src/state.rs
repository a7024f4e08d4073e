//! Shared application state for the survey API.
//!
//! The server runs on a multi-threaded runtime, so the [`RecordStore`] is
//! guarded by a [`RwLock`]. Appends hold the write lock for a single push,
//! which makes each append atomic; readers clone matching records out
//! under the read lock and therefore always see a consistent snapshot.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::seed::SeedData;
use crate::store::RecordStore;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The record store.
    pub store: Arc<RwLock<RecordStore>>,
}

impl AppState {
    /// Create application state around an existing store.
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Create application state seeded with the given data.
    pub fn with_seed(seed: SeedData) -> Self {
        Self::new(RecordStore::from_seed(seed))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_seed(SeedData::builtin())
    }
}
