//! Parsing and formatting of record timestamps.
//!
//! Timestamps are stored as [`DateTime<Utc>`] truncated to millisecond
//! precision and always written as `YYYY-MM-DDTHH:MM:SS.mmmZ`. Input is
//! more lenient: any RFC 3339 offset is accepted and normalized to UTC,
//! and a naive `YYYY-MM-DDTHH:MM:SS[.fff]` string is read as UTC.
//!
//! Query bounds are compared at full precision ([`parse_instant`]) so a
//! sub-millisecond bound never widens the window.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};

/// Format accepted for timestamps that carry no offset.
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A string could not be read as a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ISO-8601 timestamp {raw:?}: {reason}")]
pub struct TimestampError {
    /// The rejected input.
    pub raw: String,
    /// Why the last accepted form failed to parse.
    pub reason: String,
}

/// Parse an ISO-8601 timestamp into a millisecond-precision UTC instant.
///
/// # Errors
///
/// Returns [`TimestampError`] if the input is neither RFC 3339 nor a
/// naive date-time.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    Ok(parse_instant(raw)?.trunc_subsecs(3))
}

/// Parse an ISO-8601 timestamp into a UTC instant, keeping every
/// fractional digit the input carries.
///
/// # Errors
///
/// Returns [`TimestampError`] if the input is neither RFC 3339 nor a
/// naive date-time.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = raw.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, NAIVE_FORMAT).map(|n| n.and_utc()))
        .map_err(|e| TimestampError {
            raw: raw.to_owned(),
            reason: e.to_string(),
        })
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter writing timestamps with [`format_timestamp`] and reading
/// them with [`parse_timestamp`].
pub mod millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize a timestamp as a millisecond-precision `Z` string.
    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    /// Deserialize a timestamp from any accepted ISO-8601 form.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
