use std::io::{self, Write};

use anyhow::{Context, Result, anyhow};
use hydro_cli::render::{advisory_table, alias_table, columns_table, metrics_lines, stats_table};
use hydro_ingest::read_csv_file;
use hydro_map::ColumnAliasTable;
use hydro_model::ValueColumn;
use hydro_output::{
    RangeFilter, chart_series, describe, export_filtered, filter_bounds, headline_metrics,
    to_dataframe, write_csv_file,
};
use hydro_transform::{NormalizeOutcome, Normalizer};
use tracing::{info, info_span};

use crate::cli::{FilterArgs, InputArgs, ShowArgs};

fn load(args: &InputArgs) -> Result<NormalizeOutcome> {
    let path = args.file.as_path();
    let span = info_span!("file", path = %path.display());
    let _guard = span.enter();
    let records =
        read_csv_file(path).with_context(|| format!("read {}", path.display()))?;
    info!(
        rows = records.row_count(),
        columns = records.column_count(),
        encoding = records.encoding,
        "read sensor export"
    );
    Normalizer::new(args.normalize.to_options())
        .normalize_records(&records)
        .with_context(|| format!("normalize {}", path.display()))
}

pub fn run_summary(args: &InputArgs) -> Result<()> {
    let outcome = load(args)?;
    let NormalizeOutcome { table, report } = &outcome;

    println!("File: {}", args.file.display());
    println!("Encoding: {}", report.encoding);
    println!("Readings: {}", table.len());
    if let (Some(first), Some(last)) = (table.readings().first(), table.readings().last()) {
        println!("Period: {} .. {}", first.timestamp, last.timestamp);
    }
    println!("{}", columns_table(table, report));
    for line in metrics_lines(&headline_metrics(table)) {
        println!("{line}");
    }
    println!("{}", stats_table(&describe(table)));
    if let Some(advisories) = advisory_table(report) {
        println!();
        println!("Advisories:");
        println!("{advisories}");
    }
    Ok(())
}

pub fn run_series(args: &InputArgs) -> Result<()> {
    let outcome = load(args)?;
    let json = chart_series(&outcome.table)
        .to_json()
        .context("serialize chart series")?;
    println!("{json}");
    Ok(())
}

pub fn run_filter(args: &FilterArgs) -> Result<()> {
    let outcome = load(&args.input)?;
    let table = &outcome.table;
    let column = ValueColumn::from(args.column);
    let bounds = filter_bounds(table, column);
    let lo = args
        .min
        .or(bounds.map(|bounds| bounds.min))
        .ok_or_else(|| anyhow!("column '{column}' has no values; pass --min and --max"))?;
    let hi = args
        .max
        .or(bounds.map(|bounds| bounds.max))
        .ok_or_else(|| anyhow!("column '{column}' has no values; pass --min and --max"))?;
    let filter = RangeFilter::new(column, lo, hi)?;

    match &args.output {
        Some(path) => {
            let filtered = filter.apply(table);
            write_csv_file(&filtered, path)
                .with_context(|| format!("write {}", path.display()))?;
            eprintln!(
                "Wrote {} of {} rows to {}",
                filtered.len(),
                table.len(),
                path.display()
            );
        }
        None => {
            let bytes = export_filtered(table, &filter).context("export CSV")?;
            io::stdout()
                .lock()
                .write_all(&bytes)
                .context("write CSV to stdout")?;
        }
    }
    Ok(())
}

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let outcome = load(&args.input)?;
    let frame = to_dataframe(&outcome.table).context("build data frame")?;
    println!("{}", frame.head(Some(args.limit)));
    Ok(())
}

pub fn run_aliases() -> Result<()> {
    println!("{}", alias_table(&ColumnAliasTable::default()));
    Ok(())
}

