//! The static alias table.

use hydro_model::CanonicalColumn;
use serde::Serialize;

use crate::utils::normalize_text;

/// A known source spelling of a canonical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnAlias {
    pub alias: &'static str,
    pub canonical: CanonicalColumn,
}

const fn alias(alias: &'static str, canonical: CanonicalColumn) -> ColumnAlias {
    ColumnAlias { alias, canonical }
}

/// Spellings seen in InfluxDB and Grafana exports of the ESP32 sensor node.
///
/// Matching is done on [`normalize_text`] forms, so case and `_ - . / \`
/// separators do not need their own entries.
static DEFAULT_ALIASES: &[ColumnAlias] = &[
    alias("time", CanonicalColumn::Time),
    alias("timestamp", CanonicalColumn::Time),
    alias("datetime", CanonicalColumn::Time),
    alias("date time", CanonicalColumn::Time),
    alias("fecha", CanonicalColumn::Time),
    alias("temperature", CanonicalColumn::Temperature),
    alias("temperature ESP32", CanonicalColumn::Temperature),
    alias("temp", CanonicalColumn::Temperature),
    alias("temperatura", CanonicalColumn::Temperature),
    alias("humidity", CanonicalColumn::Humidity),
    alias("humidity ESP32", CanonicalColumn::Humidity),
    alias("hum", CanonicalColumn::Humidity),
    alias("relative humidity", CanonicalColumn::Humidity),
    alias("humedad", CanonicalColumn::Humidity),
    alias("valve_state", CanonicalColumn::ValveState),
    alias("valve_state ESP32", CanonicalColumn::ValveState),
    alias("valve", CanonicalColumn::ValveState),
    alias("estado_valvula", CanonicalColumn::ValveState),
];

/// Maps alternate column spellings to canonical columns.
///
/// The table is fixed for the lifetime of the process. When several entries
/// match a header, the first one in table order wins.
#[derive(Debug, Clone, Copy)]
pub struct ColumnAliasTable {
    entries: &'static [ColumnAlias],
}

impl Default for ColumnAliasTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ALIASES,
        }
    }
}

impl ColumnAliasTable {
    /// Builds a table over a custom static entry list.
    pub const fn from_static(entries: &'static [ColumnAlias]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [ColumnAlias] {
        self.entries
    }

    /// Returns the canonical column a source header resolves to.
    pub fn lookup(&self, header: &str) -> Option<CanonicalColumn> {
        let normalized = normalize_text(header);
        if normalized.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| normalize_text(entry.alias) == normalized)
            .map(|entry| entry.canonical)
    }

    /// All spellings listed for one canonical column, in table order.
    pub fn aliases_for(&self, canonical: CanonicalColumn) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|entry| entry.canonical == canonical)
            .map(|entry| entry.alias)
            .collect()
    }
}
