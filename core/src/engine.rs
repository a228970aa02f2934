//! Grouping and diff engine.
//!
//! Partitions filtered rows into per-identifier groups (first-occurrence
//! order) and computes each row's change set against its group predecessor.
//! Output is group-major: every group's results are contiguous, so a query
//! matching several logical records yields one coherent timeline per
//! record rather than interleaved noise.
//!
//! The engine never fails on data shape: missing values compare as the
//! empty string, and empty input produces empty output.

use crate::audit::{AuditError, AuditReport, AuditResult};
use crate::config::{AuditConfig, KeyMatch};
use crate::filter::{Filter, filter_rows};
use crate::identifier::resolve_identifier;
use crate::pool::RowPool;
use crate::row::{Row, SOURCE_FILE_FIELD, SourceFile};
use crate::sink::ReportSink;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;

fn group_key(row: &Row, identifier: &str, key_match: KeyMatch) -> String {
    let raw = row.get_str(identifier);
    match key_match {
        KeyMatch::Exact => raw.into_owned(),
        KeyMatch::Normalized => raw.trim().to_lowercase(),
    }
}

/// Columns whose coerced values differ between two rows, over the union of
/// both rows' columns, reserved field excluded.
fn changed_columns(prev: &Row, current: &Row) -> BTreeSet<String> {
    let mut union: FxHashSet<&str> = prev.columns().collect();
    union.extend(current.columns());

    union
        .into_iter()
        .filter(|column| *column != SOURCE_FILE_FIELD)
        .filter(|column| prev.get_str(column) != current.get_str(column))
        .map(str::to_string)
        .collect()
}

/// Partition `rows` by identifier value, preserving first-occurrence group
/// order and in-group row order.
fn group_rows<'a>(rows: &[&'a Row], identifier: &str, key_match: KeyMatch) -> Vec<Vec<&'a Row>> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<&Row>> = Vec::new();
    for &row in rows {
        let key = group_key(row, identifier, key_match);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(row);
    }
    groups
}

/// Diff an already-filtered row sequence into group-major audit results.
///
/// The first result of each group carries an empty change set; every later
/// result's `changes` is computed against the group predecessor only.
/// Output length always equals input length.
pub fn audit_rows(rows: &[&Row], identifier: &str, config: &AuditConfig) -> Vec<AuditResult> {
    let mut results = Vec::with_capacity(rows.len());
    for group in group_rows(rows, identifier, config.key_match) {
        let mut prev: Option<&Row> = None;
        for row in group {
            let result = match prev {
                None => AuditResult::baseline(row.clone()),
                Some(p) => AuditResult::with_changes(row.clone(), changed_columns(p, row)),
            };
            results.push(result);
            prev = Some(row);
        }
    }
    results
}

/// Streaming variant of [`audit_rows`]: emits each result through `sink`
/// in the same group-major order as the batch API.
pub fn audit_rows_streaming(
    rows: &[&Row],
    identifier: &str,
    config: &AuditConfig,
    sink: &mut dyn ReportSink,
) -> Result<(), AuditError> {
    sink.begin()?;
    for result in audit_rows(rows, identifier, config) {
        sink.emit(result)?;
    }
    sink.finish()
}

/// Run the full pipeline over the loaded sources: pool, identifier
/// resolution, filtering, grouping and diffing.
///
/// Degraded states (no sources, no columns) produce an empty report, not an
/// error. The only failure is the pool-size hardening rail.
pub fn run_audit(
    sources: &[SourceFile],
    query: &str,
    filters: &[Filter],
    config: &AuditConfig,
) -> Result<AuditReport, AuditError> {
    let pool = RowPool::new(sources);
    let rows = pool.row_count();
    if rows > config.max_pool_rows as usize {
        return Err(AuditError::LimitsExceeded {
            rows,
            max_rows: config.max_pool_rows,
        });
    }

    let identifier = resolve_identifier(pool.columns()).map(str::to_string);
    let filtered = filter_rows(&pool, query, identifier.as_deref(), filters);
    let results = match identifier.as_deref() {
        Some(column) => audit_rows(&filtered, column, config),
        None => Vec::new(),
    };
    Ok(AuditReport::new(identifier, results, sources.len()))
}
