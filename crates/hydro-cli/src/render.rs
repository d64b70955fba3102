//! Terminal tables for the dashboard views.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use hydro_map::ColumnAliasTable;
use hydro_model::{
    AdvisoryCode, AdvisorySeverity, CanonicalColumn, NormalizationReport, ValidatedTable,
};
use hydro_output::{ColumnStats, HeadlineMetrics};

/// Decimal places shown for statistics.
const PRECISION: usize = 2;

/// The `describe` table: one row per statistic, one column per value column.
pub fn stats_table(stats: &[ColumnStats]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("")];
    header.extend(stats.iter().map(|column| header_cell(column.column.as_str())));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=stats.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let rows: [(&str, fn(&ColumnStats) -> Option<f64>); 8] = [
        ("count", |entry| Some(entry.count as f64)),
        ("mean", |entry| entry.mean),
        ("std", |entry| entry.std),
        ("min", |entry| entry.min),
        ("25%", |entry| entry.q25),
        ("50%", |entry| entry.q50),
        ("75%", |entry| entry.q75),
        ("max", |entry| entry.max),
    ];
    for (label, value) in rows {
        let mut row = vec![Cell::new(label).add_attribute(Attribute::Bold)];
        row.extend(stats.iter().map(|column| match value(column) {
            Some(number) if label == "count" => Cell::new(number),
            Some(number) => Cell::new(format!("{number:.PRECISION$}")),
            None => dim_cell("-"),
        }));
        table.add_row(row);
    }
    table
}

/// Headline metrics as printed above the statistics.
pub fn metrics_lines(metrics: &HeadlineMetrics) -> Vec<String> {
    let show = |value: Option<f64>, unit: &str| match value {
        Some(value) => format!("{value:.PRECISION$}{unit}"),
        None => "-".to_string(),
    };
    vec![
        format!("Mean temperature: {}", show(metrics.mean_temperature, " °C")),
        format!("Mean humidity: {}", show(metrics.mean_humidity, " %")),
        format!(
            "Irrigation active: {}",
            show(metrics.irrigation_active_pct, " %")
        ),
    ]
}

/// Column overview: canonical columns with their source, then pass-through columns.
pub fn columns_table(table: &ValidatedTable, report: &NormalizationReport) -> Table {
    let backfilled = report.backfilled_columns();
    let mut output = Table::new();
    output.set_header(vec![header_cell("Column"), header_cell("Source")]);
    apply_table_style(&mut output);
    for column in CanonicalColumn::ALL {
        let name = column.as_str();
        let renamed = report
            .renamed
            .iter()
            .find(|(_, canonical)| canonical == name)
            .map(|(source, _)| source.clone());
        let source = if backfilled.iter().any(|filled| filled == name) {
            Cell::new("backfilled").fg(Color::Yellow)
        } else if let Some(source) = renamed {
            Cell::new(format!("renamed from '{source}'"))
        } else {
            dim_cell("as is")
        };
        output.add_row(vec![column_cell(name), source]);
    }
    for column in table.passthrough() {
        output.add_row(vec![Cell::new(&column.name), dim_cell("pass-through")]);
    }
    output
}

/// Advisories, or `None` when there are none.
pub fn advisory_table(report: &NormalizationReport) -> Option<Table> {
    if report.advisories.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_wide_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for advisory in &report.advisories {
        table.add_row(vec![
            severity_cell(advisory.severity),
            Cell::new(code_label(advisory.code)),
            advisory
                .column
                .as_ref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            advisory.count.map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&advisory.message),
        ]);
    }
    Some(table)
}

/// Every alias grouped by canonical column.
pub fn alias_table(aliases: &ColumnAliasTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Aliases")]);
    apply_table_style(&mut table);
    for column in CanonicalColumn::ALL {
        table.add_row(vec![
            column_cell(column.as_str()),
            Cell::new(aliases.aliases_for(column).join(", ")),
        ]);
    }
    table
}

fn code_label(code: AdvisoryCode) -> &'static str {
    match code {
        AdvisoryCode::FallbackEncoding => "fallback_encoding",
        AdvisoryCode::ColumnsRenamed => "columns_renamed",
        AdvisoryCode::NoAliasMatched => "no_alias_matched",
        AdvisoryCode::AliasCollision => "alias_collision",
        AdvisoryCode::ColumnBackfilled => "column_backfilled",
        AdvisoryCode::ValuesCoerced => "values_coerced",
        AdvisoryCode::ValveStateOutOfRange => "valve_state_out_of_range",
    }
}

fn severity_cell(severity: AdvisorySeverity) -> Cell {
    match severity {
        AdvisorySeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
        AdvisorySeverity::Info => dim_cell("INFO"),
    }
}

fn column_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}
