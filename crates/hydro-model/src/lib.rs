//! Hydroponic sensor data model.
//!
//! Shared types for the normalization pipeline: the canonical column set,
//! normalized readings, the validated table handed to every view, pipeline
//! options, advisories and the error taxonomy.

pub mod advisory;
pub mod column;
pub mod error;
pub mod options;
pub mod reading;
pub mod table;

pub use advisory::{Advisory, AdvisoryCode, AdvisorySeverity, NormalizationReport};
pub use column::{CanonicalColumn, UnknownColumn, ValueColumn};
pub use error::{
    DecodeError, DecodeFailure, NormalizeError, Result, TableError, ValidationError,
    ValidationErrorKind,
};
pub use options::{
    AliasCollisionPolicy, DEFAULT_HUMIDITY, DEFAULT_TEMPERATURE, HumidityDefault,
    NormalizeOptions, ValveStatePolicy,
};
pub use reading::NormalizedReading;
pub use table::{PassthroughColumn, ValidatedTable};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_warnings() {
        let mut report = NormalizationReport::new("UTF-8");
        report.push(Advisory::info(
            AdvisoryCode::ColumnsRenamed,
            "renamed Time -> time",
        ));
        report.push(
            Advisory::warning(AdvisoryCode::ColumnBackfilled, "filled valve_state with 0")
                .with_column("valve_state"),
        );
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_warnings());
        assert_eq!(report.backfilled_columns(), vec!["valve_state".to_string()]);
    }

    #[test]
    fn options_serialize() {
        let options = NormalizeOptions::strict();
        let json = serde_json::to_string(&options).expect("serialize options");
        let round: NormalizeOptions = serde_json::from_str(&json).expect("deserialize options");
        assert_eq!(round.alias_collision, AliasCollisionPolicy::Reject);
        assert_eq!(round.valve_state, ValveStatePolicy::Reject);
    }
}
