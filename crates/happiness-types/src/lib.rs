//! Shared type definitions for the happiness survey service.
//!
//! This crate is the single source of truth for the record schema. Types
//! flow downstream to `TypeScript` via `ts-rs` for the survey frontend.
//!
//! # Modules
//!
//! - [`category`] -- The six survey question labels
//! - [`record`] -- Individual and aggregate record shapes
//! - [`timestamp`] -- ISO-8601 parsing and millisecond formatting
//! - [`validation`] -- Field-level validation of untyped payloads
//! - [`range`] -- Inclusive time-range filtering

pub mod category;
pub mod range;
pub mod record;
pub mod timestamp;
pub mod validation;

// Re-export all public types at crate root for convenience.
pub use category::{CATEGORY_PATTERN, Category, UnknownCategory};
pub use range::TimeRange;
pub use record::{
    AggregateRecord, Answer, GEO_JSON_KIND, HappinessRecord, IndividualRecord, Location,
    NUMBER_KIND,
};
pub use timestamp::{TimestampError, format_timestamp, parse_instant, parse_timestamp};
pub use validation::{AnswerValue, validate_record};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the survey frontend.

    #[test]
    fn export_bindings() {
        // Files are written to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::category::Category::export_all();
        let _ = crate::record::Location::export_all();
        let _ = crate::record::Answer::<f64>::export_all();
        let _ = crate::record::HappinessRecord::<f64>::export_all();
    }
}
