//! Error taxonomy for the normalization pipeline.
//!
//! Every variant here is fatal: the pipeline stops and no table is produced.
//! Per-value problems (unparseable numbers, backfilled columns) are reported
//! as [`crate::Advisory`] entries instead.

use std::fmt;

use thiserror::Error;

use crate::column::CanonicalColumn;

/// Why the input bytes could not be turned into a record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// No attempted encoding produced parseable delimited text.
    Unparseable,
    /// The input has no header row.
    Empty,
    /// A byte-order mark announced an encoding that is not supported.
    UnsupportedEncoding(&'static str),
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparseable => f.write_str("unparseable"),
            Self::Empty => f.write_str("empty input"),
            Self::UnsupportedEncoding(encoding) => write!(f, "unsupported encoding {encoding}"),
        }
    }
}

/// The input could not be decoded as delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not decode CSV input ({reason}){}", attempted_suffix(attempted))]
pub struct DecodeError {
    pub reason: DecodeFailure,
    /// Encodings tried, in order.
    pub attempted: Vec<&'static str>,
    /// Last parser message, if a parse was attempted.
    pub detail: Option<String>,
}

impl DecodeError {
    pub fn new(reason: DecodeFailure, attempted: Vec<&'static str>) -> Self {
        Self {
            reason,
            attempted,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Rows handed to [`crate::ValidatedTable::new`] break a table invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// `row` (0-based) has an earlier timestamp than the row before it.
    #[error("reading {row} is earlier than the reading before it")]
    Unsorted { row: usize },

    #[error("pass-through column '{column}' has {found} values, table has {expected} rows")]
    PassthroughLength {
        column: String,
        expected: usize,
        found: usize,
    },
}

/// Discriminant of [`ValidationError`], useful for matching in callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    MissingTimeColumn,
    TimeParseFailure,
    IncompleteSchema,
    AliasCollision,
    ValveStateOutOfRange,
    InvalidTable,
}

/// The decoded table could not be validated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// No column resolves to `time`.
    #[error("no time column found (available columns: {})", available.join(", "))]
    MissingTimeColumn { available: Vec<String> },

    /// A time value could not be parsed; `row` is 1-based over data rows.
    #[error("could not parse timestamp '{value}' in column '{column}' at row {row}")]
    TimeParseFailure {
        column: String,
        row: usize,
        value: String,
    },

    /// Canonical columns still missing after backfill.
    #[error("incomplete schema after backfill, missing: {}", join_columns(missing))]
    IncompleteSchema { missing: Vec<CanonicalColumn> },

    /// Two source columns resolve to the same canonical column.
    #[error("columns {} all map to '{canonical}'", sources.join(", "))]
    AliasCollision {
        canonical: CanonicalColumn,
        sources: Vec<String>,
    },

    /// A valve state outside {0, 1} under the reject policy.
    #[error("valve state {value} at row {row} is outside {{0, 1}}")]
    ValveStateOutOfRange { row: usize, value: i64 },

    /// The assembled rows do not form a valid table.
    #[error(transparent)]
    InvalidTable(#[from] TableError),
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::MissingTimeColumn { .. } => ValidationErrorKind::MissingTimeColumn,
            Self::TimeParseFailure { .. } => ValidationErrorKind::TimeParseFailure,
            Self::IncompleteSchema { .. } => ValidationErrorKind::IncompleteSchema,
            Self::AliasCollision { .. } => ValidationErrorKind::AliasCollision,
            Self::ValveStateOutOfRange { .. } => ValidationErrorKind::ValveStateOutOfRange,
            Self::InvalidTable(_) => ValidationErrorKind::InvalidTable,
        }
    }
}

fn attempted_suffix(attempted: &[&str]) -> String {
    if attempted.is_empty() {
        String::new()
    } else {
        format!("; attempted encodings: {}", attempted.join(", "))
    }
}

fn join_columns(columns: &[CanonicalColumn]) -> String {
    columns
        .iter()
        .map(|column| column.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Any fatal pipeline failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl NormalizeError {
    /// Returns the validation kind when this is a validation failure.
    pub fn validation_kind(&self) -> Option<ValidationErrorKind> {
        match self {
            Self::Validation(error) => Some(error.kind()),
            Self::Decode(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_without_attempts_omits_encoding_list() {
        let err = DecodeError::new(DecodeFailure::Empty, Vec::new());
        assert_eq!(err.to_string(), "could not decode CSV input (empty input)");
    }

    #[test]
    fn decode_error_names_encodings() {
        let err = DecodeError::new(DecodeFailure::Unparseable, vec!["UTF-8", "windows-1252"]);
        assert_eq!(
            err.to_string(),
            "could not decode CSV input (unparseable); attempted encodings: UTF-8, windows-1252"
        );
    }

    #[test]
    fn incomplete_schema_lists_columns() {
        let err = ValidationError::IncompleteSchema {
            missing: vec![CanonicalColumn::Humidity, CanonicalColumn::ValveState],
        };
        assert_eq!(
            err.to_string(),
            "incomplete schema after backfill, missing: humidity, valve_state"
        );
        assert_eq!(err.kind(), ValidationErrorKind::IncompleteSchema);
    }

    #[test]
    fn normalize_error_exposes_kind() {
        let err: NormalizeError = ValidationError::MissingTimeColumn {
            available: vec!["humidity".to_string()],
        }
        .into();
        assert_eq!(
            err.validation_kind(),
            Some(ValidationErrorKind::MissingTimeColumn)
        );
    }
}
