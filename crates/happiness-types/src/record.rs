//! Survey record shapes.
//!
//! Individual and aggregate records share one layout and differ only in
//! the type of `answer.value`: a raw integer reply for individual records,
//! a fractional reading (an average or ratio) for aggregate records. Both
//! are instances of [`HappinessRecord`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;
use uuid::Uuid;

use crate::category::Category;

/// Location tag used by the survey clients for geo-JSON payloads.
pub const GEO_JSON_KIND: &str = "geo:json";

/// Answer tag used by the survey clients for numeric replies.
pub const NUMBER_KIND: &str = "number";

/// Where a record was submitted from.
///
/// The payload is opaque; only its shape (a tag plus a JSON object) is
/// checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Location {
    /// Payload tag, e.g. `geo:json`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Geo-JSON-shaped payload.
    #[ts(type = "Record<string, unknown>")]
    pub value: Map<String, Value>,
}

impl Location {
    /// A `geo:json` location holding a `Point` with the given coordinates.
    pub fn geo_point(latitude: f64, longitude: f64) -> Self {
        let mut value = Map::new();
        value.insert(String::from("type"), Value::from("Point"));
        value.insert(
            String::from("coordinates"),
            Value::Array(vec![Value::from(latitude), Value::from(longitude)]),
        );
        Self {
            kind: String::from(GEO_JSON_KIND),
            value,
        }
    }
}

/// A tagged answer value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Answer<V> {
    /// Answer tag, e.g. `number`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The reply itself.
    pub value: V,
}

impl<V> Answer<V> {
    /// A `number` answer.
    pub fn number(value: V) -> Self {
        Self {
            kind: String::from(NUMBER_KIND),
            value,
        }
    }
}

/// One stored survey reading.
///
/// `id` is not unique: a single respondent interaction may produce one
/// record per category, all sharing the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HappinessRecord<V> {
    /// Respondent interaction identifier.
    #[ts(type = "string")]
    pub id: Uuid,
    /// Which survey question this reading answers.
    #[serde(alias = "type")]
    pub category: Category,
    /// Where the reading was submitted from.
    pub location: Location,
    /// The reading.
    pub answer: Answer<V>,
    /// When the reading was submitted.
    #[serde(alias = "time", with = "crate::timestamp::millis")]
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
}

/// A single respondent's reply with an integer answer.
pub type IndividualRecord = HappinessRecord<i64>;

/// A summary reading with a fractional answer.
pub type AggregateRecord = HappinessRecord<f64>;
