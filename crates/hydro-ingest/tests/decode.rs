//! Decoding real-world export files from disk.

use std::io::Write;

use hydro_ingest::{FALLBACK_ENCODING, IngestError, PRIMARY_ENCODING, read_csv_file};
use hydro_model::DecodeFailure;
use tempfile::NamedTempFile;

fn export(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn grafana_export_with_bom_and_crlf() {
    let file = export(
        b"\xef\xbb\xbfTime,  temperature ESP32 ,humidity ESP32\r\n\
          2025-03-01 10:00:00,21.5,60\r\n\
          \r\n\
          2025-03-01 10:05:00, 21.7 \r\n",
    );
    let records = read_csv_file(file.path()).unwrap();
    assert_eq!(records.encoding, PRIMARY_ENCODING);
    assert_eq!(
        records.headers,
        vec!["Time", "temperature ESP32", "humidity ESP32"]
    );
    assert_eq!(records.row_count(), 2);
    assert_eq!(records.rows[1], vec!["2025-03-01 10:05:00", "21.7", ""]);
}

#[test]
fn spanish_logger_export_in_latin1() {
    let file = export(b"fecha,temperatura,humedad,notas\n2025-03-01,19.5,70,riego ma\xf1ana\n");
    let records = read_csv_file(file.path()).unwrap();
    assert_eq!(records.encoding, FALLBACK_ENCODING);
    assert_eq!(records.column(3).collect::<Vec<_>>(), vec!["riego mañana"]);
}

#[test]
fn utf16_export_is_rejected() {
    let file = export(b"\xff\xfet\x00i\x00m\x00e\x00");
    match read_csv_file(file.path()) {
        Err(IngestError::Decode(decode)) => {
            assert!(matches!(decode.reason, DecodeFailure::UnsupportedEncoding(_)));
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
}
