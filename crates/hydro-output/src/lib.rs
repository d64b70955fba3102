//! Dashboard views over a validated sensor table.
//!
//! Every function here takes a [`hydro_model::ValidatedTable`] by reference
//! and never re-validates it:
//!
//! - **stats**: `describe`-style summary statistics and headline metrics
//! - **series**: chart series for temperature, humidity and valve state
//! - **filter**: slider bounds and inclusive range filtering
//! - **export**: CSV export of a (filtered) table
//! - **frame**: the table as a Polars `DataFrame` for raw display

mod error;
pub mod export;
pub mod filter;
pub mod frame;
pub mod series;
pub mod stats;

pub use error::{ExportError, FilterError};
pub use export::{export_csv, export_filtered, write_csv, write_csv_file};
pub use filter::{FilterBounds, RangeFilter, filter_bounds, filter_rows};
pub use frame::to_dataframe;
pub use series::{ChartSeries, Series, SeriesKind, SeriesPoint, chart_series};
pub use stats::{ColumnStats, HeadlineMetrics, describe, describe_values, headline_metrics};
