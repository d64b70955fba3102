//! The normalization pipeline.
//!
//! Stages run in a fixed order and the first fatal error stops the run:
//!
//! 1. decode (`hydro-ingest`)
//! 2. alias resolution (`hydro-map`)
//! 3. time parsing and ordering
//! 4. numeric coercion
//! 5. backfill
//! 6. schema guard
//!
//! Everything non-fatal is collected into the [`NormalizationReport`]
//! returned next to the table.

use hydro_ingest::{PRIMARY_ENCODING, RawRecordSet, decode_csv};
use hydro_map::{ColumnAliasTable, RenamePlan, resolve_columns};
use hydro_model::{
    Advisory, AdvisoryCode, AliasCollisionPolicy, CanonicalColumn, NormalizationReport,
    NormalizeOptions, PassthroughColumn, Result, ValidatedTable, ValidationError, ValueColumn,
};
use tracing::{info, info_span, warn};

use crate::backfill::backfill;
use crate::guard::{WorkingTable, finalize};
use crate::numeric::{CoercedColumn, coerce_valve, coerce_values};
use crate::time::establish_time;

/// A validated table together with what was noticed while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOutcome {
    pub table: ValidatedTable,
    pub report: NormalizationReport,
}

/// Runs the pipeline with a fixed alias table and options.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    aliases: ColumnAliasTable,
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            aliases: ColumnAliasTable::default(),
            options,
        }
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: ColumnAliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Decodes `bytes` and normalizes the resulting records.
    pub fn normalize_bytes(&self, bytes: &[u8]) -> Result<NormalizeOutcome> {
        let span = info_span!("normalize", bytes = bytes.len());
        let _guard = span.enter();
        let records = decode_csv(bytes)?;
        self.run(&records)
    }

    /// Normalizes records that were already decoded.
    pub fn normalize_records(&self, records: &RawRecordSet) -> Result<NormalizeOutcome> {
        let span = info_span!("normalize", encoding = records.encoding);
        let _guard = span.enter();
        self.run(records)
    }

    fn run(&self, records: &RawRecordSet) -> Result<NormalizeOutcome> {
        let mut report = NormalizationReport::new(records.encoding);
        if records.encoding != PRIMARY_ENCODING {
            report.push(Advisory::info(
                AdvisoryCode::FallbackEncoding,
                format!("input is not valid UTF-8, decoded as {}", records.encoding),
            ));
        }

        let plan = resolve_columns(&records.headers, &self.aliases);
        self.review_plan(&plan, &mut report)?;

        let time = establish_time(records, &plan)?;
        let mut working = WorkingTable::new(records.row_count());
        working.timestamps = Some(time.timestamps);

        for column in ValueColumn::ALL {
            let Some(index) = plan.source_index(column.canonical()) else {
                continue;
            };
            let coerced = coerce_values(records.column(index));
            report_coercion(column, &coerced, &mut report);
            match column {
                ValueColumn::Temperature => working.temperature = Some(coerced.values),
                ValueColumn::Humidity => working.humidity = Some(coerced.values),
                ValueColumn::ValveState => {
                    let valve = coerce_valve(&coerced, self.options.valve_state)?;
                    if valve.filled > 0 {
                        report.push(
                            Advisory::info(
                                AdvisoryCode::ValuesCoerced,
                                format!(
                                    "{} missing valve states set to 0 (closed)",
                                    valve.filled
                                ),
                            )
                            .with_column(column.as_str())
                            .with_count(valve.filled as u64),
                        );
                    }
                    if valve.out_of_range > 0 {
                        warn!(count = valve.out_of_range, "valve states outside {{0, 1}}");
                        report.push(
                            Advisory::warning(
                                AdvisoryCode::ValveStateOutOfRange,
                                format!("{} valve states outside {{0, 1}}", valve.out_of_range),
                            )
                            .with_column(column.as_str())
                            .with_count(valve.out_of_range as u64),
                        );
                    }
                    working.valve_state = Some(valve.values);
                }
            }
        }

        for fill in backfill(&mut working, &self.options) {
            report.push(
                Advisory::warning(
                    AdvisoryCode::ColumnBackfilled,
                    format!(
                        "column '{}' missing, filled with {} ({})",
                        fill.column, fill.value, fill.source
                    ),
                )
                .with_column(fill.column.as_str())
                .with_count(working.rows as u64),
            );
        }

        working.passthrough = plan
            .passthrough
            .iter()
            .map(|source| PassthroughColumn {
                name: source.name.clone(),
                values: records
                    .column(source.source_index)
                    .map(str::to_string)
                    .collect(),
            })
            .collect();

        let table = finalize(working, &time.order)?;
        info!(
            rows = table.len(),
            passthrough = table.passthrough().len(),
            warnings = report.warning_count(),
            "normalized sensor export"
        );
        Ok(NormalizeOutcome { table, report })
    }

    /// Records renames and collisions, failing under the reject policy.
    fn review_plan(
        &self,
        plan: &RenamePlan,
        report: &mut NormalizationReport,
    ) -> std::result::Result<(), ValidationError> {
        if plan.is_unmatched() {
            warn!("no column matched a known alias");
            report.push(Advisory::warning(
                AdvisoryCode::NoAliasMatched,
                "no column matched a known alias",
            ));
        }

        if let Some(collision) = plan.collisions.first()
            && self.options.alias_collision == AliasCollisionPolicy::Reject
        {
            return Err(ValidationError::AliasCollision {
                canonical: collision.canonical,
                sources: collision.sources(),
            });
        }
        for collision in &plan.collisions {
            report.push(
                Advisory::warning(
                    AdvisoryCode::AliasCollision,
                    format!(
                        "columns {} all map to '{}', kept '{}'",
                        collision.sources().join(", "),
                        collision.canonical,
                        collision.kept
                    ),
                )
                .with_column(collision.canonical.as_str())
                .with_count(collision.dropped.len() as u64),
            );
        }

        let renamed = plan.changed_names();
        if !renamed.is_empty() {
            let pairs: Vec<String> = renamed
                .iter()
                .map(|(source, canonical)| format!("{source} -> {canonical}"))
                .collect();
            report.push(
                Advisory::info(
                    AdvisoryCode::ColumnsRenamed,
                    format!("renamed {}", pairs.join(", ")),
                )
                .with_count(renamed.len() as u64),
            );
        }
        report.renamed = renamed;
        report.passthrough = plan
            .passthrough
            .iter()
            .map(|source| source.name.clone())
            .collect();

        let unresolved: Vec<CanonicalColumn> = plan.unresolved();
        if !unresolved.is_empty() {
            info!(columns = ?unresolved, "canonical columns not present in input");
        }
        Ok(())
    }
}

fn report_coercion(column: ValueColumn, coerced: &CoercedColumn, report: &mut NormalizationReport) {
    if coerced.invalid == 0 {
        return;
    }
    warn!(column = %column, count = coerced.invalid, "non-numeric values set to missing");
    report.push(
        Advisory::warning(
            AdvisoryCode::ValuesCoerced,
            format!(
                "{} non-numeric values in '{column}' set to missing",
                coerced.invalid
            ),
        )
        .with_column(column.as_str())
        .with_count(coerced.invalid as u64),
    );
}

/// Decodes and normalizes one export with the default alias table.
pub fn normalize_bytes(bytes: &[u8], options: &NormalizeOptions) -> Result<NormalizeOutcome> {
    Normalizer::new(options.clone()).normalize_bytes(bytes)
}

/// Normalizes decoded records with the default alias table.
pub fn normalize_records(
    records: &RawRecordSet,
    options: &NormalizeOptions,
) -> Result<NormalizeOutcome> {
    Normalizer::new(options.clone()).normalize_records(records)
}
