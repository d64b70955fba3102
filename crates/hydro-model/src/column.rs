//! Canonical column names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four logical fields every validated table exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalColumn {
    Time,
    Temperature,
    Humidity,
    ValveState,
}

impl CanonicalColumn {
    /// All canonical columns in export order.
    pub const ALL: [CanonicalColumn; 4] = [
        CanonicalColumn::Time,
        CanonicalColumn::Temperature,
        CanonicalColumn::Humidity,
        CanonicalColumn::ValveState,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::ValveState => "valve_state",
        }
    }

    /// Returns the value column for this canonical column, if it is one.
    pub fn value_column(self) -> Option<ValueColumn> {
        match self {
            Self::Time => None,
            Self::Temperature => Some(ValueColumn::Temperature),
            Self::Humidity => Some(ValueColumn::Humidity),
            Self::ValveState => Some(ValueColumn::ValveState),
        }
    }
}

impl fmt::Display for CanonicalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known column name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column '{0}' (expected one of: time, temperature, humidity, valve_state)")]
pub struct UnknownColumn(pub String);

impl FromStr for CanonicalColumn {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

/// The three numeric value columns (everything except the time axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueColumn {
    Temperature,
    Humidity,
    ValveState,
}

impl ValueColumn {
    pub const ALL: [ValueColumn; 3] = [
        ValueColumn::Temperature,
        ValueColumn::Humidity,
        ValueColumn::ValveState,
    ];

    pub fn canonical(self) -> CanonicalColumn {
        match self {
            Self::Temperature => CanonicalColumn::Temperature,
            Self::Humidity => CanonicalColumn::Humidity,
            Self::ValveState => CanonicalColumn::ValveState,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.canonical().as_str()
    }
}

impl fmt::Display for ValueColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueColumn {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalColumn::from_str(s)?
            .value_column()
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}
