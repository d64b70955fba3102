//! Error types for ingestion.

use std::path::PathBuf;

use hydro_model::DecodeError;
use thiserror::Error;

/// Errors that can occur while loading an export from disk.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Bytes could not be decoded into a record set.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl IngestError {
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use hydro_model::DecodeFailure;

    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/export.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/export.csv");
    }

    #[test]
    fn test_decode_error_is_transparent() {
        let err: IngestError = DecodeError::new(DecodeFailure::Empty, vec!["UTF-8"]).into();
        assert_eq!(
            err.to_string(),
            "could not decode CSV input (empty input); attempted encodings: UTF-8"
        );
    }
}
