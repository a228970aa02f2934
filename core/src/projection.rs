//! Column projection: derive the display/export column order from a result
//! set.
//!
//! Two policies, both pure functions of the results plus the pool's column
//! universe. Either returns an empty list for an empty result set and never
//! errors.

use crate::audit::AuditResult;
use crate::config::{AuditConfig, ColumnOrder};
use crate::row::SOURCE_FILE_FIELD;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which columns a rendered report shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMode {
    /// Every column observed across the result rows.
    Full,
    /// Identifier and file columns plus only the columns that changed
    /// somewhere in the result set.
    Summary,
}

/// Project the column order for `results`.
///
/// `universe` is the pool's column universe in discovery order; it supplies
/// the stable ordering for full mode. Summary mode is
/// `[reserved field, identifier, ..changed columns sorted alphabetically]`
/// and omits columns that never appear in any change set, even when they
/// exist in the data.
pub fn project_columns(
    results: &[AuditResult],
    universe: &[String],
    identifier: Option<&str>,
    mode: ColumnMode,
    config: &AuditConfig,
) -> Vec<String> {
    if results.is_empty() {
        return Vec::new();
    }

    match mode {
        ColumnMode::Full => project_full(results, universe, config.column_order),
        ColumnMode::Summary => project_summary(results, identifier),
    }
}

fn project_full(
    results: &[AuditResult],
    universe: &[String],
    order: ColumnOrder,
) -> Vec<String> {
    let observed: FxHashSet<&str> = results
        .iter()
        .flat_map(|result| result.row.columns())
        .collect();

    let mut columns = vec![SOURCE_FILE_FIELD.to_string()];
    match order {
        ColumnOrder::FirstObserved => {
            columns.extend(
                universe
                    .iter()
                    .filter(|c| observed.contains(c.as_str()))
                    .cloned(),
            );
        }
        ColumnOrder::Alphabetical => {
            let sorted: BTreeSet<&str> = observed.into_iter().collect();
            columns.extend(sorted.into_iter().map(str::to_string));
        }
    }
    columns
}

fn project_summary(results: &[AuditResult], identifier: Option<&str>) -> Vec<String> {
    let mut changed: BTreeSet<&str> = BTreeSet::new();
    for result in results {
        changed.extend(result.changes.iter().map(String::as_str));
    }

    let mut columns = vec![SOURCE_FILE_FIELD.to_string()];
    if let Some(id) = identifier {
        if id != SOURCE_FILE_FIELD {
            columns.push(id.to_string());
        }
    }
    for column in changed {
        if !columns.iter().any(|c| c == column) {
            columns.push(column.to_string());
        }
    }
    columns
}
