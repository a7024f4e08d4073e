//! Field-level validation of untyped record payloads.
//!
//! Payloads arrive as arbitrary JSON. [`validate_record`] checks every
//! field independently and either returns the typed record or a
//! [`ValidationErrors`] map naming each failing field, so a client sees
//! all of its mistakes in one response instead of only the first.
//!
//! Nested fields are reported with dotted names (`location.value`,
//! `answer.type`). The legacy names `type` and `time` are accepted for
//! `category` and `timestamp`.

use std::borrow::Cow;

use serde_json::{Map, Value};
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::category::{CATEGORY_PATTERN, Category};
use crate::record::{Answer, HappinessRecord, Location};
use crate::timestamp::{parse_instant, parse_timestamp};

/// The numeric type carried in `answer.value`.
pub trait AnswerValue: Sized {
    /// Human-readable name of the expected JSON type, used in messages.
    const EXPECTED: &'static str;

    /// Extract the value from JSON, or `None` if it has the wrong type.
    fn from_json(value: &Value) -> Option<Self>;
}

impl AnswerValue for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl AnswerValue for f64 {
    const EXPECTED: &'static str = "a number";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

/// Validate an untyped payload against the record schema.
///
/// # Errors
///
/// Returns every field that is missing or malformed. The payload is not
/// partially accepted.
pub fn validate_record<V: AnswerValue>(
    payload: &Value,
) -> Result<HappinessRecord<V>, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(object) = payload.as_object() else {
        reject(&mut errors, "record", "type", "must be a JSON object", Some(payload));
        return Err(errors);
    };

    let id = validate_id(&mut errors, object);
    let category = validate_category(&mut errors, object);
    let location = validate_location(&mut errors, object);
    let answer = validate_answer::<V>(&mut errors, object);
    let timestamp = validate_timestamp(&mut errors, object);

    match (id, category, location, answer, timestamp) {
        (Some(id), Some(category), Some(location), Some(answer), Some(timestamp))
            if errors.is_empty() =>
        {
            Ok(HappinessRecord {
                id,
                category,
                location,
                answer,
                timestamp,
            })
        }
        _ => Err(errors),
    }
}

fn validate_id(errors: &mut ValidationErrors, object: &Map<String, Value>) -> Option<Uuid> {
    let raw = required(errors, object, "id", None)?;
    let parsed = raw.as_str().and_then(|s| s.parse::<Uuid>().ok());
    if parsed.is_none() {
        reject(errors, "id", "uuid", "must be a UUID string", Some(raw));
    }
    parsed
}

fn validate_category(
    errors: &mut ValidationErrors,
    object: &Map<String, Value>,
) -> Option<Category> {
    let raw = required(errors, object, "category", Some("type"))?;
    let parsed = raw.as_str().and_then(|s| s.parse::<Category>().ok());
    if parsed.is_none() {
        reject(
            errors,
            "category",
            "regex",
            format!("must match {CATEGORY_PATTERN}"),
            Some(raw),
        );
    }
    parsed
}

fn validate_location(
    errors: &mut ValidationErrors,
    object: &Map<String, Value>,
) -> Option<Location> {
    let raw = required(errors, object, "location", None)?;
    let Some(location) = raw.as_object() else {
        reject(errors, "location", "type", "must be an object", Some(raw));
        return None;
    };

    let kind = tag(errors, location, "location.type");
    let value = match location.get("value") {
        Some(Value::Object(value)) => Some(value.clone()),
        Some(other) => {
            reject(errors, "location.value", "type", "must be an object", Some(other));
            None
        }
        None => {
            reject(errors, "location.value", "required", "is required", None);
            None
        }
    };

    Some(Location {
        kind: kind?,
        value: value?,
    })
}

fn validate_answer<V: AnswerValue>(
    errors: &mut ValidationErrors,
    object: &Map<String, Value>,
) -> Option<Answer<V>> {
    let raw = required(errors, object, "answer", None)?;
    let Some(answer) = raw.as_object() else {
        reject(errors, "answer", "type", "must be an object", Some(raw));
        return None;
    };

    let kind = tag(errors, answer, "answer.type");
    let value = if let Some(value) = answer.get("value") {
        let parsed = V::from_json(value);
        if parsed.is_none() {
            reject(
                errors,
                "answer.value",
                "type",
                format!("must be {}", V::EXPECTED),
                Some(value),
            );
        }
        parsed
    } else {
        reject(errors, "answer.value", "required", "is required", None);
        None
    };

    Some(Answer {
        kind: kind?,
        value: value?,
    })
}

fn validate_timestamp(
    errors: &mut ValidationErrors,
    object: &Map<String, Value>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    let raw = required(errors, object, "timestamp", Some("time"))?;
    let parsed = raw.as_str().and_then(|s| parse_timestamp(s).ok());
    if parsed.is_none() {
        reject(
            errors,
            "timestamp",
            "datetime",
            "must be an ISO-8601 timestamp",
            Some(raw),
        );
    }
    parsed
}

/// Validate a single query-string timestamp, recording a failure under
/// `field`. The bound keeps full precision; an empty string is rejected.
pub fn validate_query_timestamp(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: &str,
) -> Option<chrono::DateTime<chrono::Utc>> {
    match parse_instant(raw) {
        Ok(ts) => Some(ts),
        Err(e) => {
            reject(errors, field, "datetime", e.to_string(), Some(&Value::from(raw)));
            None
        }
    }
}

/// Look up `name` (or its legacy `alias`), recording a `required` error
/// when neither is present.
fn required<'a>(
    errors: &mut ValidationErrors,
    object: &'a Map<String, Value>,
    name: &'static str,
    alias: Option<&str>,
) -> Option<&'a Value> {
    let found = object
        .get(name)
        .or_else(|| alias.and_then(|alias| object.get(alias)));
    if found.is_none() {
        reject(errors, name, "required", "is required", None);
    }
    found
}

/// Read the string `type` tag of a nested shape.
fn tag(
    errors: &mut ValidationErrors,
    object: &Map<String, Value>,
    field: &'static str,
) -> Option<String> {
    match object.get("type") {
        Some(Value::String(kind)) => Some(kind.clone()),
        Some(other) => {
            reject(errors, field, "type", "must be a string", Some(other));
            None
        }
        None => {
            reject(errors, field, "required", "is required", None);
            None
        }
    }
}

fn reject(
    errors: &mut ValidationErrors,
    field: &'static str,
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
    value: Option<&Value>,
) {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    if let Some(value) = value {
        error.add_param(Cow::from("value"), value);
    }
    errors.add(field, error);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]

    use serde_json::json;

    use super::*;
    use crate::record::{AggregateRecord, IndividualRecord};

    fn payload() -> Value {
        json!({
            "id": "123e4567-e89b-12d3-a456-426614174001",
            "category": "happiness1",
            "location": {
                "type": "geo:json",
                "value": { "type": "Point", "coordinates": [35.717_701, 139.744_862] }
            },
            "answer": { "type": "number", "value": 3 },
            "timestamp": "2022-01-01T00:00:00.000Z"
        })
    }

    fn failing_fields(errors: &ValidationErrors) -> Vec<String> {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(ToString::to_string)
            .collect();
        fields.sort();
        fields
    }

    #[test]
    fn accepts_a_well_formed_individual_record() {
        let record: IndividualRecord = validate_record(&payload()).unwrap();
        assert_eq!(record.category, Category::Happiness1);
        assert_eq!(record.answer.value, 3);
        assert_eq!(record.location.kind, "geo:json");
    }

    #[test]
    fn validated_record_matches_serde_reading() {
        let validated: IndividualRecord = validate_record(&payload()).unwrap();
        let deserialized: IndividualRecord = serde_json::from_value(payload()).unwrap();
        assert_eq!(validated, deserialized);
    }

    #[test]
    fn rejects_category_outside_pattern() {
        let mut body = payload();
        body["category"] = json!("happiness7");
        let errors = validate_record::<i64>(&body).unwrap_err();
        assert_eq!(failing_fields(&errors), ["category"]);
    }

    #[test]
    fn reports_every_failing_field_at_once() {
        let body = json!({
            "id": "not-a-uuid",
            "category": 1,
            "location": { "type": "geo:json", "value": [1, 2] },
            "answer": { "value": 2.5 },
            "timestamp": "tomorrow"
        });
        let errors = validate_record::<i64>(&body).unwrap_err();
        assert_eq!(
            failing_fields(&errors),
            [
                "answer.type",
                "answer.value",
                "category",
                "id",
                "location.value",
                "timestamp"
            ]
        );
    }

    #[test]
    fn missing_fields_are_required() {
        let errors = validate_record::<i64>(&json!({})).unwrap_err();
        assert_eq!(
            failing_fields(&errors),
            ["answer", "category", "id", "location", "timestamp"]
        );
        let category = errors.field_errors().get("category").copied().unwrap();
        assert_eq!(category[0].code, "required");
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let errors = validate_record::<i64>(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(failing_fields(&errors), ["record"]);
    }

    #[test]
    fn legacy_names_are_accepted() {
        let body = json!({
            "id": "123e4567-e89b-12d3-a456-426614174001",
            "type": "happiness6",
            "location": { "type": "geo:json", "value": {} },
            "answer": { "type": "number", "value": 5 },
            "time": "2021-08-29T00:00:00.000Z"
        });
        let record: IndividualRecord = validate_record(&body).unwrap();
        assert_eq!(record.category, Category::Happiness6);
    }

    #[test]
    fn aggregate_answers_accept_fractions_and_integers() {
        let mut body = payload();
        body["answer"]["value"] = json!(0.7);
        let record: AggregateRecord = validate_record(&body).unwrap();
        assert_eq!(record.answer.value, 0.7);

        body["answer"]["value"] = json!(1);
        let record: AggregateRecord = validate_record(&body).unwrap();
        assert_eq!(record.answer.value, 1.0);
    }

    #[test]
    fn rejected_value_is_echoed_in_params() {
        let mut body = payload();
        body["category"] = json!("happiness7");
        let errors = validate_record::<i64>(&body).unwrap_err();
        let category = errors.field_errors().get("category").copied().unwrap();
        assert_eq!(category[0].params.get("value"), Some(&json!("happiness7")));
    }

    #[test]
    fn query_timestamp_failure_names_the_parameter() {
        let mut errors = ValidationErrors::new();
        assert!(validate_query_timestamp(&mut errors, "start", "soon").is_none());
        assert_eq!(failing_fields(&errors), ["start"]);
    }

    #[test]
    fn empty_query_timestamp_is_rejected() {
        let mut errors = ValidationErrors::new();
        assert!(validate_query_timestamp(&mut errors, "end", "").is_none());
        assert_eq!(failing_fields(&errors), ["end"]);
    }
}
