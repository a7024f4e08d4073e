//! REST API endpoint handlers for the survey service.
//!
//! All handlers operate on the in-memory [`RecordStore`] held by the
//! shared [`AppState`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/happiness/me` | Individual records, optionally time-filtered |
//! | `GET` | `/api/happiness/all` | Aggregate records, optionally time-filtered |
//! | `POST` | `/api/happiness` | Validate and append an individual record |
//!
//! [`RecordStore`]: crate::store::RecordStore

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::Uri;
use happiness_types::{AggregateRecord, IndividualRecord, TimeRange, validate_record};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters shared by the list endpoints.
///
/// Both bounds are raw strings so that a bad timestamp is reported as a
/// field-level validation error rather than a generic query rejection.
#[derive(Debug, Default, serde::Deserialize)]
pub struct RangeQuery {
    /// Earliest timestamp to include (ISO-8601, inclusive).
    pub start: Option<String>,
    /// Latest timestamp to include (ISO-8601, inclusive).
    pub end: Option<String>,
}

impl RangeQuery {
    fn time_range(&self) -> Result<TimeRange, ApiError> {
        TimeRange::from_query(self.start.as_deref(), self.end.as_deref()).map_err(|errors| {
            debug!(start = ?self.start, end = ?self.end, "Rejected time range");
            ApiError::from(errors)
        })
    }
}

// ---------------------------------------------------------------------------
// GET /api/happiness/me
// ---------------------------------------------------------------------------

/// List individual records within the optional `start`/`end` window.
pub async fn list_individual(
    State(state): State<Arc<AppState>>,
    params: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Vec<IndividualRecord>>, ApiError> {
    let Query(params) =
        params.map_err(|rejection| ApiError::MalformedQuery(rejection.body_text()))?;
    let range = params.time_range()?;
    let records = state.store.read().await.list_individual(&range);
    debug!(count = records.len(), "Listed individual records");
    Ok(Json(records))
}

// ---------------------------------------------------------------------------
// GET /api/happiness/all
// ---------------------------------------------------------------------------

/// List aggregate records within the optional `start`/`end` window.
pub async fn list_aggregate(
    State(state): State<Arc<AppState>>,
    params: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Vec<AggregateRecord>>, ApiError> {
    let Query(params) =
        params.map_err(|rejection| ApiError::MalformedQuery(rejection.body_text()))?;
    let range = params.time_range()?;
    let records = state.store.read().await.list_aggregate(&range);
    debug!(count = records.len(), "Listed aggregate records");
    Ok(Json(records))
}

// ---------------------------------------------------------------------------
// POST /api/happiness
// ---------------------------------------------------------------------------

/// Validate an individual record and append it to the store.
///
/// The body is read as untyped JSON first so that every failing field is
/// reported together. Nothing is stored unless the whole record is valid.
pub async fn append_individual(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<IndividualRecord>, ApiError> {
    let Json(payload) =
        payload.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;

    let record: IndividualRecord = validate_record(&payload).map_err(|errors| {
        debug!(%errors, "Rejected individual record");
        ApiError::from(errors)
    })?;

    let stored = {
        let mut store = state.store.write().await;
        let stored = store.append(record);
        info!(
            id = %stored.id,
            category = %stored.category,
            total = store.individual_len(),
            "Appended individual record"
        );
        stored
    };

    Ok(Json(stored))
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Respond to unmatched routes with a JSON 404.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}
