//! Synthesis of value columns missing from the export.
//!
//! Every validated table has all three value columns so that charts and
//! statistics can be drawn unconditionally. A column that is absent from the
//! source is filled with a single broadcast value:
//!
//! | Missing       | Fill value                                                     |
//! |---------------|----------------------------------------------------------------|
//! | `temperature` | mean of `humidity` if it has values, else `default_temperature` |
//! | `humidity`    | `default_humidity`, or mean of `temperature` (see [`HumidityDefault`]) |
//! | `valve_state` | 0 (closed)                                                     |
//!
//! The column whose fill does not depend on the other is filled first, so
//! with both temperature and humidity absent one is derived from the other's
//! fill value.

use std::fmt;

use hydro_model::{HumidityDefault, NormalizeOptions, ValueColumn};
use tracing::info;

use crate::guard::WorkingTable;
use crate::numeric::mean;

/// Where a fill value came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillSource {
    /// A configured constant.
    Constant,
    /// The mean of another value column.
    MeanOf(ValueColumn),
}

impl fmt::Display for FillSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant => f.write_str("default"),
            Self::MeanOf(column) => write!(f, "mean of {column}"),
        }
    }
}

/// One synthesized column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backfill {
    pub column: ValueColumn,
    pub value: f64,
    pub source: FillSource,
}

/// Fills every absent value column of `table`.
///
/// Columns already present are left untouched. Returns the fills in the
/// order they were applied.
pub fn backfill(table: &mut WorkingTable, options: &NormalizeOptions) -> Vec<Backfill> {
    let rows = table.rows;
    let mut fills = Vec::new();

    if table.humidity.is_none() && options.humidity_default == HumidityDefault::Constant {
        let fill = Backfill {
            column: ValueColumn::Humidity,
            value: options.default_humidity,
            source: FillSource::Constant,
        };
        table.humidity = Some(vec![Some(fill.value); rows]);
        fills.push(fill);
    }

    if table.temperature.is_none() {
        let fill = match table.humidity.as_deref().and_then(mean) {
            Some(value) => Backfill {
                column: ValueColumn::Temperature,
                value,
                source: FillSource::MeanOf(ValueColumn::Humidity),
            },
            None => Backfill {
                column: ValueColumn::Temperature,
                value: options.default_temperature,
                source: FillSource::Constant,
            },
        };
        table.temperature = Some(vec![Some(fill.value); rows]);
        fills.push(fill);
    }

    if table.humidity.is_none() {
        let fill = match table.temperature.as_deref().and_then(mean) {
            Some(value) => Backfill {
                column: ValueColumn::Humidity,
                value,
                source: FillSource::MeanOf(ValueColumn::Temperature),
            },
            None => Backfill {
                column: ValueColumn::Humidity,
                value: options.default_humidity,
                source: FillSource::Constant,
            },
        };
        table.humidity = Some(vec![Some(fill.value); rows]);
        fills.push(fill);
    }

    if table.valve_state.is_none() {
        table.valve_state = Some(vec![0; rows]);
        fills.push(Backfill {
            column: ValueColumn::ValveState,
            value: 0.0,
            source: FillSource::Constant,
        });
    }

    for fill in &fills {
        info!(
            column = %fill.column,
            value = fill.value,
            source = %fill.source,
            rows,
            "backfilled missing column"
        );
    }
    fills
}
