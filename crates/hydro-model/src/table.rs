//! The validated, time-indexed table consumed by every view.

use chrono::NaiveDateTime;

use crate::column::{CanonicalColumn, ValueColumn};
use crate::error::TableError;
use crate::reading::NormalizedReading;

/// A source column that matched no alias, carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassthroughColumn {
    pub name: String,
    /// One value per reading, in table order.
    pub values: Vec<String>,
}

/// Normalized readings sorted by timestamp ascending.
///
/// Built once per input by the normalization pipeline and only ever read
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedTable {
    readings: Vec<NormalizedReading>,
    passthrough: Vec<PassthroughColumn>,
}

impl ValidatedTable {
    /// Wraps readings that are already sorted by timestamp.
    ///
    /// Fails if the readings are out of order or a pass-through column does
    /// not hold one value per reading.
    pub fn new(
        readings: Vec<NormalizedReading>,
        passthrough: Vec<PassthroughColumn>,
    ) -> Result<Self, TableError> {
        if let Some(row) = readings
            .windows(2)
            .position(|pair| pair[1].timestamp < pair[0].timestamp)
        {
            return Err(TableError::Unsorted { row: row + 1 });
        }
        if let Some(column) = passthrough
            .iter()
            .find(|column| column.values.len() != readings.len())
        {
            return Err(TableError::PassthroughLength {
                column: column.name.clone(),
                expected: readings.len(),
                found: column.values.len(),
            });
        }
        Ok(Self {
            readings,
            passthrough,
        })
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn readings(&self) -> &[NormalizedReading] {
        &self.readings
    }

    pub fn passthrough(&self) -> &[PassthroughColumn] {
        &self.passthrough
    }

    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.readings.iter().map(|reading| reading.timestamp)
    }

    /// Values of one column in table order, `None` where missing.
    pub fn values(&self, column: ValueColumn) -> Vec<Option<f64>> {
        self.readings
            .iter()
            .map(|reading| reading.value(column))
            .collect()
    }

    /// Non-missing values of one column in table order.
    pub fn present_values(&self, column: ValueColumn) -> Vec<f64> {
        self.readings
            .iter()
            .filter_map(|reading| reading.value(column))
            .collect()
    }

    /// Column names in export order: canonical columns then pass-through columns.
    pub fn column_names(&self) -> Vec<String> {
        CanonicalColumn::ALL
            .iter()
            .map(|column| column.as_str().to_string())
            .chain(self.passthrough.iter().map(|column| column.name.clone()))
            .collect()
    }

    /// Returns a new table holding only the rows at `indices`, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let readings = indices
            .iter()
            .map(|&index| self.readings[index].clone())
            .collect();
        let passthrough = self
            .passthrough
            .iter()
            .map(|column| PassthroughColumn {
                name: column.name.clone(),
                values: indices
                    .iter()
                    .map(|&index| column.values[index].clone())
                    .collect(),
            })
            .collect();
        Self {
            readings,
            passthrough,
        }
    }
}
