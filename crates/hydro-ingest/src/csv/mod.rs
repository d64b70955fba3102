//! CSV decoding and parsing.

mod decode;
mod header;
mod parse;

pub use decode::{FALLBACK_ENCODING, PRIMARY_ENCODING, decode_csv};

use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};
use crate::record::RawRecordSet;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Reads an export from disk and decodes it.
pub fn read_csv_file(path: &Path) -> Result<RawRecordSet> {
    check_file_size(path)?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read export");
    Ok(decode_csv(&bytes)?)
}
