//! Raw data view as a Polars `DataFrame`.

use hydro_model::{ValidatedTable, ValueColumn};
use hydro_transform::format_timestamp;
use polars::prelude::*;

/// Builds a `DataFrame` with the export column layout.
///
/// Timestamps are rendered with the export format; value columns keep their
/// types (`f64` with nulls for missing values, `i64` for the valve).
pub fn to_dataframe(table: &ValidatedTable) -> PolarsResult<DataFrame> {
    let time: Vec<String> = table.timestamps().map(format_timestamp).collect();
    let valve: Vec<i64> = table
        .readings()
        .iter()
        .map(|reading| reading.valve_state)
        .collect();

    let mut columns = vec![
        Series::new("time".into(), time).into_column(),
        Series::new(
            ValueColumn::Temperature.as_str().into(),
            table.values(ValueColumn::Temperature),
        )
        .into_column(),
        Series::new(
            ValueColumn::Humidity.as_str().into(),
            table.values(ValueColumn::Humidity),
        )
        .into_column(),
        Series::new(ValueColumn::ValveState.as_str().into(), valve).into_column(),
    ];
    for column in table.passthrough() {
        columns.push(Series::new(column.name.as_str().into(), column.values.clone()).into_column());
    }
    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hydro_model::{NormalizedReading, PassthroughColumn};

    use super::*;

    #[test]
    fn frame_matches_table() {
        let timestamp = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let table = ValidatedTable::new(
            vec![NormalizedReading {
                timestamp,
                temperature: None,
                humidity: Some(61.5),
                valve_state: 1,
            }],
            vec![PassthroughColumn {
                name: "device".to_string(),
                values: vec!["esp-1".to_string()],
            }],
        )
        .unwrap();
        let df = to_dataframe(&table).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(
            df.get_column_names_str(),
            vec!["time", "temperature", "humidity", "valve_state", "device"]
        );
        assert_eq!(df.column("temperature").unwrap().null_count(), 1);
        assert_eq!(df.column("valve_state").unwrap().dtype(), &DataType::Int64);
    }
}
