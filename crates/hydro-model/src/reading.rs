use chrono::NaiveDateTime;

use crate::column::ValueColumn;

/// One row of a validated table.
///
/// Timestamps are naive UTC: inputs carrying an offset are converted to UTC
/// during parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReading {
    pub timestamp: NaiveDateTime,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    /// Never missing; 0 = closed, 1 = open.
    pub valve_state: i64,
}

impl NormalizedReading {
    /// Returns the reading's value for a column as a float.
    pub fn value(&self, column: ValueColumn) -> Option<f64> {
        match column {
            ValueColumn::Temperature => self.temperature,
            ValueColumn::Humidity => self.humidity,
            ValueColumn::ValveState => Some(self.valve_state as f64),
        }
    }
}
