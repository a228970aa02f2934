//! The master row pool: an ordered view over every loaded source file.

use crate::row::{Row, SOURCE_FILE_FIELD, SourceFile};
use rustc_hash::FxHashSet;

/// Ordered concatenation of all loaded sources.
///
/// # Invariants
///
/// - `rows()` yields exactly each source's rows, in source load order, then
///   in-file order.
/// - `columns()` is the deduplicated column universe in discovery order
///   (per-file header order, files in load order), reserved field excluded.
#[derive(Debug)]
pub struct RowPool<'a> {
    sources: &'a [SourceFile],
    columns: Vec<String>,
}

impl<'a> RowPool<'a> {
    pub fn new(sources: &'a [SourceFile]) -> RowPool<'a> {
        let mut seen = FxHashSet::default();
        let mut columns = Vec::new();
        for source in sources {
            for column in &source.columns {
                if column == SOURCE_FILE_FIELD {
                    continue;
                }
                if seen.insert(column.as_str()) {
                    columns.push(column.clone());
                }
            }
        }
        RowPool { sources, columns }
    }

    /// Column universe in discovery order, reserved field excluded.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a Row> + '_ {
        self.sources.iter().flat_map(|s| s.rows.iter())
    }

    pub fn row_count(&self) -> usize {
        self.sources.iter().map(|s| s.rows.len()).sum()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}
