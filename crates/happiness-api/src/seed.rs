//! Startup data for the record store.
//!
//! The built-in seed mirrors the sample data the survey frontend was
//! developed against: one respondent interaction answering all six
//! questions, plus a single aggregate reading. A JSON seed file can
//! replace it; every record in the file goes through the same schema
//! validation as a `POST`.

use std::path::Path;

use chrono::{DateTime, Utc};
use happiness_types::{
    AggregateRecord, Answer, AnswerValue, Category, HappinessRecord, IndividualRecord, Location,
    validate_record,
};
use serde_json::Value;
use uuid::Uuid;
use validator::ValidationErrors;

/// Respondent id shared by every built-in seed record.
pub const SEED_ID: Uuid = Uuid::from_u128(0x123e_4567_e89b_12d3_a456_4266_1417_4001);

/// `2021-08-29T00:00:00Z`, the timestamp of every built-in seed record.
const SEED_TIMESTAMP: DateTime<Utc> = DateTime::from_timestamp_nanos(1_630_195_200_000_000_000);

/// Coordinates of every built-in seed record.
const SEED_POINT: (f64, f64) = (35.717_701, 139.744_862);

/// Errors that can occur when loading a seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Failed to read the seed file from disk.
    #[error("failed to read seed file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The seed file is not valid JSON or lacks the expected sections.
    #[error("failed to parse seed JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// A record in the seed file failed schema validation.
    #[error("invalid {section} record at index {index}: {errors}")]
    Invalid {
        /// Which collection the record belongs to (`individual` or `aggregate`).
        section: &'static str,
        /// Position of the record within its collection.
        index: usize,
        /// The field errors.
        errors: ValidationErrors,
    },
}

/// Untyped layout of a seed file.
#[derive(Debug, Default, serde::Deserialize)]
struct SeedFile {
    #[serde(default)]
    individual: Vec<Value>,
    #[serde(default)]
    aggregate: Vec<Value>,
}

/// The two record collections the store starts with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    /// Individual records in insertion order.
    pub individual: Vec<IndividualRecord>,
    /// Aggregate records in insertion order.
    pub aggregate: Vec<AggregateRecord>,
}

impl SeedData {
    /// The built-in sample data: six individual records (one per
    /// category) and one aggregate `happiness3` reading of `0.7`.
    pub fn builtin() -> Self {
        let individual = Category::ALL
            .into_iter()
            .map(|category| seed_record(category, 1))
            .collect();
        let aggregate = vec![seed_record(Category::Happiness3, 0.7)];
        Self {
            individual,
            aggregate,
        }
    }

    /// Parse seed data from a JSON document of the form
    /// `{"individual": [...], "aggregate": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Json`] if the document is malformed, or
    /// [`SeedError::Invalid`] for the first record that fails validation.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let file: SeedFile = serde_json::from_str(json)?;
        Ok(Self {
            individual: validate_section("individual", &file.individual)?,
            aggregate: validate_section("aggregate", &file.aggregate)?,
        })
    }

    /// Load seed data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Io`] if the file cannot be read, otherwise as
    /// [`SeedData::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

fn seed_record<V>(category: Category, value: V) -> HappinessRecord<V> {
    HappinessRecord {
        id: SEED_ID,
        category,
        location: Location::geo_point(SEED_POINT.0, SEED_POINT.1),
        answer: Answer::number(value),
        timestamp: SEED_TIMESTAMP,
    }
}

fn validate_section<V: AnswerValue>(
    section: &'static str,
    payloads: &[Value],
) -> Result<Vec<HappinessRecord<V>>, SeedError> {
    payloads
        .iter()
        .enumerate()
        .map(|(index, payload)| {
            validate_record(payload).map_err(|errors| SeedError::Invalid {
                section,
                index,
                errors,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::float_cmp,
        clippy::panic,
        clippy::indexing_slicing
    )]

    use happiness_types::format_timestamp;

    use super::*;

    #[test]
    fn builtin_has_one_individual_record_per_category() {
        let seed = SeedData::builtin();
        let categories: Vec<Category> = seed.individual.iter().map(|r| r.category).collect();
        assert_eq!(categories, Category::ALL);
        assert!(seed.individual.iter().all(|r| r.id == SEED_ID));
        assert!(seed.individual.iter().all(|r| r.answer.value == 1));
    }

    #[test]
    fn builtin_timestamps_are_the_survey_date() {
        let seed = SeedData::builtin();
        for record in &seed.individual {
            assert_eq!(format_timestamp(&record.timestamp), "2021-08-29T00:00:00.000Z");
        }
    }

    #[test]
    fn builtin_aggregate_is_a_single_fractional_reading() {
        let seed = SeedData::builtin();
        assert_eq!(seed.aggregate.len(), 1);
        assert_eq!(seed.aggregate[0].category, Category::Happiness3);
        assert_eq!(seed.aggregate[0].answer.value, 0.7);
    }

    #[test]
    fn parses_seed_json() {
        let json = r#"{
            "individual": [{
                "id": "00000000-0000-0000-0000-000000000001",
                "category": "happiness5",
                "location": { "type": "geo:json", "value": { "type": "Point", "coordinates": [1.0, 2.0] } },
                "answer": { "type": "number", "value": 4 },
                "timestamp": "2023-05-01T12:00:00.000Z"
            }]
        }"#;
        let seed = SeedData::from_json(json).unwrap();
        assert_eq!(seed.individual.len(), 1);
        assert_eq!(seed.individual[0].category, Category::Happiness5);
        assert!(seed.aggregate.is_empty());
    }

    #[test]
    fn invalid_seed_record_reports_its_position() {
        let json = r#"{
            "aggregate": [{
                "id": "00000000-0000-0000-0000-000000000001",
                "category": "happiness9",
                "location": { "type": "geo:json", "value": {} },
                "answer": { "type": "number", "value": 0.5 },
                "timestamp": "2023-05-01T12:00:00.000Z"
            }]
        }"#;
        match SeedData::from_json(json) {
            Err(SeedError::Invalid { section, index, .. }) => {
                assert_eq!(section, "aggregate");
                assert_eq!(index, 0);
            }
            other => panic!("expected invalid seed record, got {other:?}"),
        }
    }

    #[test]
    fn malformed_seed_json_is_rejected() {
        assert!(matches!(
            SeedData::from_json("[1, 2"),
            Err(SeedError::Json { .. })
        ));
    }

    #[test]
    fn missing_seed_file_is_an_io_error() {
        let result = SeedData::from_file(Path::new("/nonexistent/happiness-seed.json"));
        assert!(matches!(result, Err(SeedError::Io { .. })));
    }
}
