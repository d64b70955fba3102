#![deny(unsafe_code)]

//! Column alias resolution.
//!
//! Sensor exports name the same field in many ways (`Time`, `_time`,
//! `humidity ESP32`, ...). This crate holds the static [`ColumnAliasTable`]
//! and turns a header row into a [`RenamePlan`]: which source column feeds
//! each canonical column, which columns pass through untouched, and which
//! columns lost an alias collision.

pub mod aliases;
pub mod resolver;
pub mod types;
pub mod utils;

pub use aliases::{ColumnAlias, ColumnAliasTable};
pub use resolver::resolve_columns;
pub use types::{AliasCollision, ColumnRename, PassthroughSource, RenamePlan};
pub use utils::normalize_text;
