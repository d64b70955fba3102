//! Rename plan types.

use hydro_model::CanonicalColumn;
use serde::Serialize;

/// A source column chosen to feed a canonical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRename {
    /// Position of the source column in the header row.
    pub source_index: usize,
    pub source_name: String,
    pub canonical: CanonicalColumn,
}

/// A source column that matched no alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassthroughSource {
    pub source_index: usize,
    pub name: String,
}

/// Several source columns resolved to the same canonical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasCollision {
    pub canonical: CanonicalColumn,
    /// The column that won (the last one by position).
    pub kept: String,
    /// Earlier columns that were overwritten, in header order.
    pub dropped: Vec<String>,
}

impl AliasCollision {
    /// All colliding source names in header order.
    pub fn sources(&self) -> Vec<String> {
        self.dropped
            .iter()
            .cloned()
            .chain(std::iter::once(self.kept.clone()))
            .collect()
    }
}

/// Outcome of resolving one header row against the alias table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenamePlan {
    /// One entry per resolved canonical column, in source column order.
    pub renames: Vec<ColumnRename>,
    /// Unmatched columns, in source column order.
    pub passthrough: Vec<PassthroughSource>,
    pub collisions: Vec<AliasCollision>,
}

impl RenamePlan {
    /// Source column index feeding `canonical`, if any.
    pub fn source_index(&self, canonical: CanonicalColumn) -> Option<usize> {
        self.rename_for(canonical).map(|rename| rename.source_index)
    }

    pub fn rename_for(&self, canonical: CanonicalColumn) -> Option<&ColumnRename> {
        self.renames
            .iter()
            .find(|rename| rename.canonical == canonical)
    }

    pub fn resolves(&self, canonical: CanonicalColumn) -> bool {
        self.rename_for(canonical).is_some()
    }

    /// True when no header matched any alias.
    pub fn is_unmatched(&self) -> bool {
        self.renames.is_empty()
    }

    /// Renames whose source spelling differs from the canonical name.
    pub fn changed_names(&self) -> Vec<(String, String)> {
        self.renames
            .iter()
            .filter(|rename| rename.source_name != rename.canonical.as_str())
            .map(|rename| {
                (
                    rename.source_name.clone(),
                    rename.canonical.as_str().to_string(),
                )
            })
            .collect()
    }

    /// Canonical columns that no header resolved to.
    pub fn unresolved(&self) -> Vec<CanonicalColumn> {
        CanonicalColumn::ALL
            .into_iter()
            .filter(|column| !self.resolves(*column))
            .collect()
    }
}
