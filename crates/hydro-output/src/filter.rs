//! Range filtering for the filter/export view.

use std::cmp::Ordering;

use hydro_model::{ValidatedTable, ValueColumn};
use serde::Serialize;
use tracing::debug;

use crate::error::FilterError;

/// Margin added around a degenerate range.
const DEGENERATE_MARGIN: f64 = 0.1;

/// Slider bounds for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterBounds {
    pub min: f64,
    pub max: f64,
}

/// Minimum and maximum of the column's present values.
///
/// A constant column would give an empty slider, so `min == max` is widened
/// to `[min(v, 0) - 0.1, max(v, 1) + 0.1]`. Returns `None` when the column
/// has no values.
pub fn filter_bounds(table: &ValidatedTable, column: ValueColumn) -> Option<FilterBounds> {
    let values = table.present_values(column);
    let min = values.iter().copied().reduce(f64::min)?;
    let max = values.iter().copied().reduce(f64::max)?;
    if min < max {
        return Some(FilterBounds { min, max });
    }
    Some(FilterBounds {
        min: min.min(0.0) - DEGENERATE_MARGIN,
        max: max.max(1.0) + DEGENERATE_MARGIN,
    })
}

/// An inclusive `[lo, hi]` range on one value column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter {
    column: ValueColumn,
    lo: f64,
    hi: f64,
}

impl RangeFilter {
    /// Fails with [`FilterError::InvalidRange`] unless `lo <= hi`.
    pub fn new(column: ValueColumn, lo: f64, hi: f64) -> Result<Self, FilterError> {
        match lo.partial_cmp(&hi) {
            Some(Ordering::Less | Ordering::Equal) => Ok(Self { column, lo, hi }),
            Some(Ordering::Greater) | None => Err(FilterError::InvalidRange { column, lo, hi }),
        }
    }

    pub fn from_bounds(column: ValueColumn, bounds: FilterBounds) -> Result<Self, FilterError> {
        Self::new(column, bounds.min, bounds.max)
    }

    pub fn column(&self) -> ValueColumn {
        self.column
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Missing values never match.
    pub fn contains(&self, value: Option<f64>) -> bool {
        value.is_some_and(|value| self.lo <= value && value <= self.hi)
    }

    /// Indices of matching rows, in table order.
    pub fn matching_rows(&self, table: &ValidatedTable) -> Vec<usize> {
        table
            .readings()
            .iter()
            .enumerate()
            .filter(|(_, reading)| self.contains(reading.value(self.column)))
            .map(|(index, _)| index)
            .collect()
    }

    /// The matching rows as a new table.
    pub fn apply(&self, table: &ValidatedTable) -> ValidatedTable {
        let rows = self.matching_rows(table);
        debug!(
            column = %self.column,
            lo = self.lo,
            hi = self.hi,
            kept = rows.len(),
            total = table.len(),
            "applied range filter"
        );
        table.select_rows(&rows)
    }
}

/// Rows whose `column` value lies in `[lo, hi]`.
pub fn filter_rows(
    table: &ValidatedTable,
    column: ValueColumn,
    lo: f64,
    hi: f64,
) -> Result<ValidatedTable, FilterError> {
    Ok(RangeFilter::new(column, lo, hi)?.apply(table))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hydro_model::{NormalizedReading, PassthroughColumn};

    use super::*;

    fn table(temperatures: &[Option<f64>], valves: &[i64]) -> ValidatedTable {
        let readings = temperatures
            .iter()
            .zip(valves)
            .enumerate()
            .map(|(index, (temperature, valve))| NormalizedReading {
                timestamp: NaiveDate::from_ymd_opt(2025, 3, 1)
                    .unwrap()
                    .and_hms_opt(index as u32, 0, 0)
                    .unwrap(),
                temperature: *temperature,
                humidity: Some(50.0),
                valve_state: *valve,
            })
            .collect::<Vec<_>>();
        let device = PassthroughColumn {
            name: "device".to_string(),
            values: (0..readings.len()).map(|index| format!("esp-{index}")).collect(),
        };
        ValidatedTable::new(readings, vec![device]).unwrap()
    }

    #[test]
    fn bounds_of_varying_column() {
        let table = table(&[Some(21.0), None, Some(19.5), Some(23.0)], &[0, 1, 0, 1]);
        assert_eq!(
            filter_bounds(&table, ValueColumn::Temperature),
            Some(FilterBounds {
                min: 19.5,
                max: 23.0
            })
        );
    }

    #[test]
    fn constant_valve_column_is_widened() {
        let closed = table(&[Some(20.0), Some(21.0)], &[0, 0]);
        let open = table(&[Some(20.0), Some(21.0)], &[1, 1]);
        for table in [closed, open] {
            let bounds = filter_bounds(&table, ValueColumn::ValveState).unwrap();
            assert!((bounds.min - -0.1).abs() < 1e-12);
            assert!((bounds.max - 1.1).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_large_value_is_widened_around_itself() {
        let table = table(&[Some(22.0), Some(22.0)], &[0, 0]);
        let bounds = filter_bounds(&table, ValueColumn::Temperature).unwrap();
        assert!((bounds.min - -0.1).abs() < 1e-12);
        assert!((bounds.max - 22.1).abs() < 1e-12);
    }

    #[test]
    fn empty_column_has_no_bounds() {
        let table = table(&[None, None], &[0, 0]);
        assert_eq!(filter_bounds(&table, ValueColumn::Temperature), None);
    }

    #[test]
    fn filter_is_inclusive_and_skips_missing() {
        let table = table(&[Some(21.0), None, Some(19.5), Some(23.0)], &[0, 1, 0, 1]);
        let filtered = filter_rows(&table, ValueColumn::Temperature, 19.5, 21.0).unwrap();
        assert_eq!(
            filtered.values(ValueColumn::Temperature),
            vec![Some(21.0), Some(19.5)]
        );
        assert_eq!(filtered.passthrough()[0].values, vec!["esp-0", "esp-2"]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let table = table(&[Some(21.0)], &[0]);
        let err = filter_rows(&table, ValueColumn::Humidity, 60.0, 40.0).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidRange {
                column: ValueColumn::Humidity,
                lo: 60.0,
                hi: 40.0
            }
        );
        assert!(RangeFilter::new(ValueColumn::Humidity, f64::NAN, 1.0).is_err());
    }
}
