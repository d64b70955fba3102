//! Header resolution.

use std::collections::BTreeMap;

use hydro_model::CanonicalColumn;
use tracing::{debug, warn};

use crate::aliases::ColumnAliasTable;
use crate::types::{AliasCollision, ColumnRename, PassthroughSource, RenamePlan};

/// Resolves a header row against the alias table.
///
/// Never fails. Headers that match no alias become pass-through columns.
/// When two headers resolve to the same canonical column, the later one
/// wins and the earlier one is recorded in [`RenamePlan::collisions`].
pub fn resolve_columns(headers: &[String], table: &ColumnAliasTable) -> RenamePlan {
    let mut winners: BTreeMap<CanonicalColumn, ColumnRename> = BTreeMap::new();
    let mut overwritten: BTreeMap<CanonicalColumn, Vec<String>> = BTreeMap::new();
    let mut passthrough = Vec::new();

    for (index, header) in headers.iter().enumerate() {
        let Some(canonical) = table.lookup(header) else {
            passthrough.push(PassthroughSource {
                source_index: index,
                name: header.clone(),
            });
            continue;
        };
        debug!(source = %header, canonical = %canonical, "resolved column alias");
        let rename = ColumnRename {
            source_index: index,
            source_name: header.clone(),
            canonical,
        };
        if let Some(previous) = winners.insert(canonical, rename) {
            overwritten
                .entry(canonical)
                .or_default()
                .push(previous.source_name);
        }
    }

    let collisions: Vec<AliasCollision> = overwritten
        .into_iter()
        .filter_map(|(canonical, dropped)| {
            let kept = winners.get(&canonical)?.source_name.clone();
            Some(AliasCollision {
                canonical,
                kept,
                dropped,
            })
        })
        .collect();
    for collision in &collisions {
        warn!(
            canonical = %collision.canonical,
            kept = %collision.kept,
            dropped = ?collision.dropped,
            "several columns map to the same canonical column"
        );
    }

    let mut renames: Vec<ColumnRename> = winners.into_values().collect();
    renames.sort_by_key(|rename| rename.source_index);

    RenamePlan {
        renames,
        passthrough,
        collisions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn renames_known_aliases_and_passes_through_the_rest() {
        let plan = resolve_columns(
            &headers(&["Time", "humidity ESP32", "device"]),
            &ColumnAliasTable::default(),
        );
        assert_eq!(plan.source_index(CanonicalColumn::Time), Some(0));
        assert_eq!(plan.source_index(CanonicalColumn::Humidity), Some(1));
        assert_eq!(plan.passthrough.len(), 1);
        assert_eq!(plan.passthrough[0].name, "device");
        assert_eq!(
            plan.unresolved(),
            vec![CanonicalColumn::Temperature, CanonicalColumn::ValveState]
        );
        assert_eq!(
            plan.changed_names(),
            vec![
                ("Time".to_string(), "time".to_string()),
                ("humidity ESP32".to_string(), "humidity".to_string()),
            ]
        );
    }

    #[test]
    fn later_column_wins_collision() {
        let plan = resolve_columns(
            &headers(&["_time", "temperature", "Temperature ESP32"]),
            &ColumnAliasTable::default(),
        );
        assert_eq!(plan.source_index(CanonicalColumn::Temperature), Some(2));
        assert_eq!(plan.collisions.len(), 1);
        assert_eq!(plan.collisions[0].kept, "Temperature ESP32");
        assert_eq!(plan.collisions[0].dropped, vec!["temperature".to_string()]);
        assert!(plan.passthrough.is_empty());
    }

    #[test]
    fn no_match_is_not_an_error() {
        let plan = resolve_columns(&headers(&["a", "b"]), &ColumnAliasTable::default());
        assert!(plan.is_unmatched());
        assert_eq!(plan.passthrough.len(), 2);
    }
}
