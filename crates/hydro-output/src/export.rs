//! CSV export.
//!
//! Columns are written as `time`, `temperature`, `humidity`, `valve_state`
//! followed by the pass-through columns. Missing values are empty cells and
//! floats use their shortest round-trip form, so an exported file normalizes
//! back to the same table.

use std::fs;
use std::io;
use std::path::Path;

use hydro_model::ValidatedTable;
use hydro_transform::format_timestamp;
use tracing::info;

use crate::error::ExportError;
use crate::filter::RangeFilter;

fn format_value(value: Option<f64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

/// Writes the table as UTF-8 CSV.
pub fn write_csv<W: io::Write>(table: &ValidatedTable, writer: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(table.column_names())?;

    for (index, reading) in table.readings().iter().enumerate() {
        let mut record = vec![
            format_timestamp(reading.timestamp),
            format_value(reading.temperature),
            format_value(reading.humidity),
            reading.valve_state.to_string(),
        ];
        record.extend(
            table
                .passthrough()
                .iter()
                .map(|column| column.values[index].clone()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// The whole table as CSV bytes.
pub fn export_csv(table: &ValidatedTable) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    Ok(buffer)
}

/// The rows matching `filter` as CSV bytes.
pub fn export_filtered(
    table: &ValidatedTable,
    filter: &RangeFilter,
) -> Result<Vec<u8>, ExportError> {
    export_csv(&filter.apply(table))
}

/// Writes the table to `path`, replacing any existing file.
pub fn write_csv_file(table: &ValidatedTable, path: &Path) -> Result<(), ExportError> {
    let bytes = export_csv(table)?;
    fs::write(path, &bytes).map_err(|source| ExportError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = table.len(), "exported CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hydro_model::{NormalizedReading, PassthroughColumn, ValueColumn};

    use super::*;

    fn table() -> ValidatedTable {
        let at = |hour, millis| {
            NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_milli_opt(hour, 0, 0, millis)
                .unwrap()
        };
        ValidatedTable::new(
            vec![
                NormalizedReading {
                    timestamp: at(8, 0),
                    temperature: Some(20.5),
                    humidity: None,
                    valve_state: 1,
                },
                NormalizedReading {
                    timestamp: at(9, 250),
                    temperature: Some(21.0),
                    humidity: Some(58.25),
                    valve_state: 0,
                },
            ],
            vec![PassthroughColumn {
                name: "note".to_string(),
                values: vec!["ok".to_string(), "pump, refilled".to_string()],
            }],
        )
        .unwrap()
    }

    #[test]
    fn export_layout() {
        let csv = String::from_utf8(export_csv(&table()).unwrap()).unwrap();
        insta::assert_snapshot!(csv, @r#"
        time,temperature,humidity,valve_state,note
        2025-03-01 08:00:00,20.5,,1,ok
        2025-03-01 09:00:00.250,21,58.25,0,"pump, refilled"
        "#);
    }

    #[test]
    fn filtered_export_keeps_header() {
        let filter = RangeFilter::new(ValueColumn::Humidity, 90.0, 100.0).unwrap();
        let csv = String::from_utf8(export_filtered(&table(), &filter).unwrap()).unwrap();
        assert_eq!(csv, "time,temperature,humidity,valve_state,note\n");
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        write_csv_file(&table(), &path).unwrap();
        let written = fs::read(&path).unwrap();
        assert_eq!(written, export_csv(&table()).unwrap());
    }
}
