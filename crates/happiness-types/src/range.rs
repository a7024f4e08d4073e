//! Inclusive time-range filtering over records.

use chrono::{DateTime, Utc};
use validator::ValidationErrors;

use crate::record::HappinessRecord;
use crate::validation::validate_query_timestamp;

/// An optionally bounded, inclusive time window.
///
/// A missing bound imposes no constraint on that side. A window whose
/// `start` lies after its `end` is valid and simply matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    /// Earliest matching timestamp, inclusive.
    pub start: Option<DateTime<Utc>>,
    /// Latest matching timestamp, inclusive.
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// A window with no bounds.
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Build a window from raw query-string values.
    ///
    /// An absent value leaves that side unbounded. A present value must
    /// parse, even when empty. Both values are checked before either
    /// error is returned.
    ///
    /// # Errors
    ///
    /// Returns field errors under `start` and/or `end` for values that do
    /// not parse as timestamps.
    pub fn from_query(start: Option<&str>, end: Option<&str>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let start = parse_bound(&mut errors, "start", start);
        let end = parse_bound(&mut errors, "end", end);
        if errors.is_empty() {
            Ok(Self { start, end })
        } else {
            Err(errors)
        }
    }

    /// Whether `ts` falls inside the window.
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| start <= *ts) && self.end.is_none_or(|end| *ts <= end)
    }

    /// Clone out the records inside the window, preserving their order.
    pub fn filter<V: Clone>(&self, records: &[HappinessRecord<V>]) -> Vec<HappinessRecord<V>> {
        records
            .iter()
            .filter(|record| self.contains(&record.timestamp))
            .cloned()
            .collect()
    }
}

fn parse_bound(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
) -> Option<DateTime<Utc>> {
    raw.and_then(|raw| validate_query_timestamp(errors, field, raw))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use uuid::Uuid;

    use super::*;
    use crate::category::Category;
    use crate::record::{Answer, IndividualRecord, Location};
    use crate::timestamp::parse_timestamp;

    fn ts(raw: &str) -> DateTime<Utc> {
        parse_timestamp(raw).unwrap()
    }

    fn record(category: Category, at: &str) -> IndividualRecord {
        IndividualRecord {
            id: Uuid::nil(),
            category,
            location: Location::geo_point(0.0, 0.0),
            answer: Answer::number(1),
            timestamp: ts(at),
        }
    }

    fn records() -> Vec<IndividualRecord> {
        vec![
            record(Category::Happiness1, "2021-08-29T00:00:00Z"),
            record(Category::Happiness2, "2021-08-30T00:00:00Z"),
            record(Category::Happiness3, "2021-08-28T00:00:00Z"),
            record(Category::Happiness4, "2021-08-31T00:00:00Z"),
        ]
    }

    fn categories(records: &[IndividualRecord]) -> Vec<Category> {
        records.iter().map(|r| r.category).collect()
    }

    #[test]
    fn unbounded_keeps_everything_in_order() {
        let all = records();
        assert_eq!(TimeRange::unbounded().filter(&all), all);
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = TimeRange {
            start: Some(ts("2021-08-29T00:00:00Z")),
            end: Some(ts("2021-08-30T00:00:00Z")),
        };
        assert_eq!(
            categories(&range.filter(&records())),
            [Category::Happiness1, Category::Happiness2]
        );
    }

    #[test]
    fn single_sided_bounds() {
        let from = TimeRange {
            start: Some(ts("2021-08-30T00:00:00Z")),
            end: None,
        };
        assert_eq!(
            categories(&from.filter(&records())),
            [Category::Happiness2, Category::Happiness4]
        );

        let until = TimeRange {
            start: None,
            end: Some(ts("2021-08-29T00:00:00Z")),
        };
        assert_eq!(
            categories(&until.filter(&records())),
            [Category::Happiness1, Category::Happiness3]
        );
    }

    #[test]
    fn inverted_window_matches_nothing() {
        let range = TimeRange {
            start: Some(ts("2021-08-31T00:00:00Z")),
            end: Some(ts("2021-08-28T00:00:00Z")),
        };
        assert!(range.filter(&records()).is_empty());
    }

    #[test]
    fn from_query_without_values_is_unbounded() {
        let range = TimeRange::from_query(None, None).unwrap();
        assert_eq!(range, TimeRange::unbounded());
    }

    #[test]
    fn from_query_rejects_empty_bounds() {
        let errors = TimeRange::from_query(Some(""), Some("  ")).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("start"));
        assert!(fields.contains_key("end"));
    }

    #[test]
    fn sub_millisecond_start_excludes_earlier_records() {
        let range = TimeRange::from_query(Some("2021-08-29T00:00:00.0005Z"), None).unwrap();
        assert_eq!(
            categories(&range.filter(&records())),
            [Category::Happiness2, Category::Happiness4]
        );
    }

    #[test]
    fn sub_millisecond_end_keeps_the_whole_millisecond() {
        let range = TimeRange::from_query(None, Some("2021-08-29T00:00:00.0005Z")).unwrap();
        assert_eq!(
            categories(&range.filter(&records())),
            [Category::Happiness1, Category::Happiness3]
        );
    }

    #[test]
    fn from_query_reports_both_bad_bounds() {
        let errors = TimeRange::from_query(Some("x"), Some("y")).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("start"));
        assert!(fields.contains_key("end"));
    }
}
