//! Summary statistics.
//!
//! [`describe`] mirrors the classic dataframe `describe()` table: count,
//! mean, sample standard deviation, minimum, quartiles with linear
//! interpolation, and maximum. Missing values are excluded before anything
//! is computed.

use hydro_model::{ValidatedTable, ValueColumn};
use serde::Serialize;

/// Statistics for one value column. Every field but `count` is `None` for a
/// column without values; `std` also needs at least two values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: ValueColumn,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Describes every value column of the table, in canonical order.
pub fn describe(table: &ValidatedTable) -> Vec<ColumnStats> {
    ValueColumn::ALL
        .into_iter()
        .map(|column| describe_values(column, &table.present_values(column)))
        .collect()
}

/// Describes a list of present values.
pub fn describe_values(column: ValueColumn, values: &[f64]) -> ColumnStats {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let mean = mean(&sorted);
    let std = mean.filter(|_| count > 1).map(|mean| {
        let squares: f64 = sorted.iter().map(|value| (value - mean).powi(2)).sum();
        (squares / (count - 1) as f64).sqrt()
    });

    ColumnStats {
        column,
        count,
        mean,
        std,
        min: sorted.first().copied(),
        q25: quantile(&sorted, 0.25),
        q50: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Linear-interpolated quantile of an ascending slice.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// The three numbers shown above the dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadlineMetrics {
    pub mean_temperature: Option<f64>,
    pub mean_humidity: Option<f64>,
    /// Share of readings with the valve open, in percent.
    pub irrigation_active_pct: Option<f64>,
}

pub fn headline_metrics(table: &ValidatedTable) -> HeadlineMetrics {
    HeadlineMetrics {
        mean_temperature: mean(&table.present_values(ValueColumn::Temperature)),
        mean_humidity: mean(&table.present_values(ValueColumn::Humidity)),
        irrigation_active_pct: mean(&table.present_values(ValueColumn::ValveState))
            .map(|share| share * 100.0),
    }
}
