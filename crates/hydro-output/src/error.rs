use std::io;
use std::path::PathBuf;

use hydro_model::ValueColumn;
use thiserror::Error;

/// A filter request that cannot be applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The lower bound is above the upper bound, or a bound is not a number.
    #[error("invalid range for '{column}': {lo} > {hi}")]
    InvalidRange { column: ValueColumn, lo: f64, hi: f64 },
}

/// Writing the CSV export failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to write '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
