//! Sensor export normalization.
//!
//! This crate turns a decoded [`hydro_ingest::RawRecordSet`] into a
//! [`hydro_model::ValidatedTable`]:
//!
//! - **timestamp**: parsing and formatting of the time axis
//! - **time**: locating the time column and computing the sort order
//! - **numeric**: per-value tolerant coercion of the value columns
//! - **backfill**: synthesizing value columns the export lacks
//! - **guard**: the final schema check and table assembly
//! - **pipeline**: the stages wired together

pub mod backfill;
pub mod guard;
pub mod numeric;
pub mod pipeline;
pub mod time;
pub mod timestamp;

pub use backfill::{Backfill, FillSource, backfill};
pub use guard::{WorkingTable, finalize};
pub use numeric::{CoercedColumn, ValveColumn, coerce_valve, coerce_values, mean, parse_f64};
pub use pipeline::{NormalizeOutcome, Normalizer, normalize_bytes, normalize_records};
pub use time::{TimeColumn, establish_time};
pub use timestamp::{format_timestamp, parse_timestamp};
