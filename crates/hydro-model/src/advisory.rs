//! Non-fatal findings produced while normalizing a file.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorySeverity {
    Info,
    Warning,
}

/// What an advisory is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryCode {
    /// Input was decoded with the fallback encoding.
    FallbackEncoding,
    /// Source columns were renamed to canonical names.
    ColumnsRenamed,
    /// No source column matched any alias.
    NoAliasMatched,
    /// Two source columns resolved to the same canonical name.
    AliasCollision,
    /// A canonical column was synthesized with default values.
    ColumnBackfilled,
    /// Cells that could not be read as numbers were set to missing.
    ValuesCoerced,
    /// Valve states outside {0, 1}.
    ValveStateOutOfRange,
}

/// A single advisory message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub code: AdvisoryCode,
    pub severity: AdvisorySeverity,
    pub message: String,
    /// Column the advisory refers to, if any.
    pub column: Option<String>,
    /// Number of affected values, if counted.
    pub count: Option<u64>,
}

impl Advisory {
    pub fn info(code: AdvisoryCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: AdvisorySeverity::Info,
            message: message.into(),
            column: None,
            count: None,
        }
    }

    pub fn warning(code: AdvisoryCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: AdvisorySeverity::Warning,
            message: message.into(),
            column: None,
            count: None,
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}

/// Everything the pipeline has to say about one input besides the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationReport {
    /// Encoding that successfully decoded the input.
    pub encoding: String,
    /// Source name to canonical name, in source column order.
    pub renamed: Vec<(String, String)>,
    /// Source columns carried through without a canonical meaning.
    pub passthrough: Vec<String>,
    pub advisories: Vec<Advisory>,
}

impl NormalizationReport {
    pub fn new(encoding: impl Into<String>) -> Self {
        Self {
            encoding: encoding.into(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, advisory: Advisory) {
        self.advisories.push(advisory);
    }

    pub fn warning_count(&self) -> usize {
        self.advisories
            .iter()
            .filter(|advisory| advisory.severity == AdvisorySeverity::Warning)
            .count()
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn advisories_with(&self, code: AdvisoryCode) -> impl Iterator<Item = &Advisory> {
        self.advisories
            .iter()
            .filter(move |advisory| advisory.code == code)
    }

    /// Names of canonical columns that were synthesized.
    pub fn backfilled_columns(&self) -> Vec<String> {
        self.advisories_with(AdvisoryCode::ColumnBackfilled)
            .filter_map(|advisory| advisory.column.clone())
            .collect()
    }
}
