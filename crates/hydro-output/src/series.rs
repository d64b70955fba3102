//! Chart series.

use chrono::NaiveDateTime;
use hydro_model::{ValidatedTable, ValueColumn};
use hydro_transform::format_timestamp;
use serde::{Serialize, Serializer};

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    /// Held until the next point; used for the on/off valve.
    Step,
}

/// One point; a missing value is a gap in the line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(*timestamp))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub column: ValueColumn,
    pub kind: SeriesKind,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    fn from_table(table: &ValidatedTable, column: ValueColumn, kind: SeriesKind) -> Self {
        let points = table
            .readings()
            .iter()
            .map(|reading| SeriesPoint {
                timestamp: reading.timestamp,
                value: reading.value(column),
            })
            .collect();
        Self {
            column,
            kind,
            points,
        }
    }
}

/// The three dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub temperature: Series,
    pub humidity: Series,
    pub valve_state: Series,
}

impl ChartSeries {
    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        [&self.temperature, &self.humidity, &self.valve_state].into_iter()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds the temperature and humidity lines and the valve step series.
pub fn chart_series(table: &ValidatedTable) -> ChartSeries {
    ChartSeries {
        temperature: Series::from_table(table, ValueColumn::Temperature, SeriesKind::Line),
        humidity: Series::from_table(table, ValueColumn::Humidity, SeriesKind::Line),
        valve_state: Series::from_table(table, ValueColumn::ValveState, SeriesKind::Step),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hydro_model::NormalizedReading;

    use super::*;

    fn table() -> ValidatedTable {
        let at = |hour| {
            NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap()
        };
        ValidatedTable::new(
            vec![
                NormalizedReading {
                    timestamp: at(8),
                    temperature: Some(20.5),
                    humidity: None,
                    valve_state: 1,
                },
                NormalizedReading {
                    timestamp: at(9),
                    temperature: Some(21.0),
                    humidity: Some(58.0),
                    valve_state: 0,
                },
            ],
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn one_point_per_reading() {
        let series = chart_series(&table());
        assert!(series.iter().all(|series| series.points.len() == 2));
        assert_eq!(series.humidity.points[0].value, None);
        assert_eq!(series.valve_state.kind, SeriesKind::Step);
        assert_eq!(series.valve_state.points[0].value, Some(1.0));
    }

    #[test]
    fn serializes_valve_series() {
        let series = chart_series(&table());
        let value = serde_json::to_value(&series.valve_state).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "column": "valve_state",
                "kind": "step",
                "points": [
                    { "timestamp": "2025-03-01 08:00:00", "value": 1.0 },
                    { "timestamp": "2025-03-01 09:00:00", "value": 0.0 }
                ]
            })
        );
    }
}
