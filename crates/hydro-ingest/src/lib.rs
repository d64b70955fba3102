//! Sensor export ingestion.
//!
//! Turns the raw bytes of a CSV export into a [`RawRecordSet`]: decodes the
//! bytes (UTF-8 first, then a single-byte Latin fallback), parses delimited
//! text and normalizes header and cell whitespace. Nothing here interprets
//! column meaning; that is the job of `hydro-map` and `hydro-transform`.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use hydro_ingest::{decode_csv, read_csv_file};
//!
//! let records = read_csv_file(Path::new("export.csv"))?;
//! println!("{} rows decoded as {}", records.row_count(), records.encoding);
//!
//! let records = decode_csv(b"Time,humidity ESP32\n2025-01-01 00:00:00,61.2\n")?;
//! ```

mod csv;
mod error;
mod record;

pub use crate::csv::{
    FALLBACK_ENCODING, MAX_CSV_FILE_SIZE, PRIMARY_ENCODING, check_file_size,
    check_file_size_with_limit, decode_csv, read_csv_file,
};
pub use error::{IngestError, Result};
pub use record::RawRecordSet;
