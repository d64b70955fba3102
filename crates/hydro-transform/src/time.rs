//! Time column establishment.

use chrono::NaiveDateTime;
use hydro_ingest::RawRecordSet;
use hydro_map::RenamePlan;
use hydro_model::{CanonicalColumn, ValidationError};
use tracing::{debug, warn};

use crate::timestamp::parse_timestamp;

/// The parsed time axis of one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeColumn {
    /// Source header the timestamps came from.
    pub source: String,
    /// Timestamps in source row order.
    pub timestamps: Vec<NaiveDateTime>,
    /// Source row indices in ascending timestamp order; ties keep source order.
    pub order: Vec<usize>,
}

/// Parses the column resolved to `time` and computes the row order.
///
/// Parsing is all-or-nothing: the first value that is empty or not a
/// recognizable timestamp aborts with [`ValidationError::TimeParseFailure`].
pub fn establish_time(
    records: &RawRecordSet,
    plan: &RenamePlan,
) -> Result<TimeColumn, ValidationError> {
    let Some(rename) = plan.rename_for(CanonicalColumn::Time) else {
        warn!(columns = ?records.headers, "no time column");
        return Err(ValidationError::MissingTimeColumn {
            available: records.headers.clone(),
        });
    };

    let mut timestamps = Vec::with_capacity(records.row_count());
    for (index, value) in records.column(rename.source_index).enumerate() {
        let Some(timestamp) = parse_timestamp(value) else {
            warn!(
                column = %rename.source_name,
                row = index + 1,
                "unparseable timestamp"
            );
            return Err(ValidationError::TimeParseFailure {
                column: rename.source_name.clone(),
                row: index + 1,
                value: value.to_string(),
            });
        };
        timestamps.push(timestamp);
    }

    let mut order: Vec<usize> = (0..timestamps.len()).collect();
    order.sort_by_key(|&index| timestamps[index]);
    debug!(
        column = %rename.source_name,
        rows = timestamps.len(),
        already_sorted = order.iter().enumerate().all(|(position, &index)| position == index),
        "established time index"
    );

    Ok(TimeColumn {
        source: rename.source_name.clone(),
        timestamps,
        order,
    })
}
