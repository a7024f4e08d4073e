//! HTTP API for the happiness survey service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`GET /api/happiness/me`** -- individual survey records
//! - **`GET /api/happiness/all`** -- aggregate survey readings
//! - **`POST /api/happiness`** -- validate and append an individual record
//!
//! Both list endpoints accept optional inclusive `start` and `end`
//! ISO-8601 bounds.
//!
//! # Architecture
//!
//! Records live only in process memory inside a [`RecordStore`] behind
//! the shared [`AppState`]. Nothing is persisted; the store starts from
//! [`SeedData`] and grows by append until the process exits.
//!
//! [`RecordStore`]: store::RecordStore
//! [`SeedData`]: seed::SeedData

pub mod error;
pub mod handlers;
pub mod router;
pub mod seed;
pub mod server;
pub mod state;
pub mod store;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use seed::{SeedData, SeedError};
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
pub use store::RecordStore;
