//! Schema guard and table assembly.
//!
//! The pipeline builds a [`WorkingTable`] column by column; [`finalize`]
//! refuses to produce a [`ValidatedTable`] unless every canonical column is
//! present, then reorders rows by time.

use chrono::NaiveDateTime;
use hydro_model::{
    CanonicalColumn, NormalizedReading, PassthroughColumn, ValidatedTable, ValidationError,
};
use tracing::error;

/// Columns collected in source row order, before sorting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingTable {
    /// Number of data rows.
    pub rows: usize,
    pub timestamps: Option<Vec<NaiveDateTime>>,
    pub temperature: Option<Vec<Option<f64>>>,
    pub humidity: Option<Vec<Option<f64>>>,
    pub valve_state: Option<Vec<i64>>,
    pub passthrough: Vec<PassthroughColumn>,
}

impl WorkingTable {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Canonical columns not yet populated, in canonical order.
    pub fn missing_columns(&self) -> Vec<CanonicalColumn> {
        let present = [
            self.timestamps.is_some(),
            self.temperature.is_some(),
            self.humidity.is_some(),
            self.valve_state.is_some(),
        ];
        CanonicalColumn::ALL
            .into_iter()
            .zip(present)
            .filter_map(|(column, present)| (!present).then_some(column))
            .collect()
    }
}

/// Checks the schema and assembles the table with rows in `order`.
///
/// `order` holds source row indices; it must be a permutation of
/// `0..working.rows` sorted by timestamp.
pub fn finalize(
    working: WorkingTable,
    order: &[usize],
) -> Result<ValidatedTable, ValidationError> {
    let missing = working.missing_columns();
    let WorkingTable {
        timestamps: Some(timestamps),
        temperature: Some(temperature),
        humidity: Some(humidity),
        valve_state: Some(valve_state),
        passthrough,
        ..
    } = working
    else {
        error!(missing = ?missing, "schema incomplete after backfill");
        return Err(ValidationError::IncompleteSchema { missing });
    };

    let readings = order
        .iter()
        .map(|&index| NormalizedReading {
            timestamp: timestamps[index],
            temperature: temperature[index],
            humidity: humidity[index],
            valve_state: valve_state[index],
        })
        .collect();

    let passthrough = passthrough
        .into_iter()
        .map(|column| PassthroughColumn {
            values: order
                .iter()
                .map(|&index| column.values[index].clone())
                .collect(),
            name: column.name,
        })
        .collect();

    Ok(ValidatedTable::new(readings, passthrough)?)
}
