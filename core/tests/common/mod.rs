//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use snapshot_audit::{
    AuditConfig, AuditResult, Filter, FilterId, Row, RowPool, Scalar, SourceFile, audit_rows,
    filter_rows, resolve_identifier,
};

/// Build a source file from a header and string records.
pub fn file(name: &str, columns: &[&str], records: &[&[&str]]) -> SourceFile {
    SourceFile::from_records(
        name,
        columns.iter().map(|c| c.to_string()).collect(),
        records.iter().map(|r| r.to_vec()),
    )
}

/// Build a standalone row for direct engine calls.
pub fn row(source: &str, fields: &[(&str, &str)]) -> Row {
    Row::new(
        source,
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), Scalar::from(*v))),
    )
}

pub fn filter(id: u64, column: &str, value: &str) -> Filter {
    Filter::new(FilterId(id), column, value)
}

/// Run resolve → filter → audit over `sources` with default config.
pub fn audit_sources(
    sources: &[SourceFile],
    query: &str,
    filters: &[Filter],
) -> Vec<AuditResult> {
    audit_sources_with(sources, query, filters, &AuditConfig::default())
}

pub fn audit_sources_with(
    sources: &[SourceFile],
    query: &str,
    filters: &[Filter],
    config: &AuditConfig,
) -> Vec<AuditResult> {
    let pool = RowPool::new(sources);
    let identifier = resolve_identifier(pool.columns()).map(str::to_string);
    let filtered = filter_rows(&pool, query, identifier.as_deref(), filters);
    match identifier.as_deref() {
        Some(column) => audit_rows(&filtered, column, config),
        None => Vec::new(),
    }
}

/// The change set of `result` as sorted owned strings, for assertions.
pub fn changes(result: &AuditResult) -> Vec<String> {
    result.changes.iter().cloned().collect()
}
