//! Audit results and reports.
//!
//! This module defines the types produced by the grouping and diff engine:
//! - [`AuditResult`]: One filtered row plus the set of columns that changed
//!   since the previous snapshot of the same logical record
//! - [`AuditReport`]: A versioned collection of results with counts and
//!   warnings
//! - [`AuditError`]: Errors produced by the auditing APIs

use crate::error_codes;
use crate::row::Row;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// One row of the audit timeline.
///
/// `changes` holds the column names whose coerced string values differ from
/// the immediately preceding snapshot in the same record group. It is empty
/// for the first snapshot of a group and never contains the reserved
/// source-file field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    pub row: Row,
    pub changes: BTreeSet<String>,
}

impl AuditResult {
    pub fn baseline(row: Row) -> AuditResult {
        AuditResult {
            row,
            changes: BTreeSet::new(),
        }
    }

    pub fn with_changes(row: Row, changes: BTreeSet<String>) -> AuditResult {
        AuditResult { row, changes }
    }
}

/// Errors produced by auditing APIs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuditError {
    #[error(
        "[SNAPAUD_AUDIT_001] pool of {rows} rows exceeds the configured limit of {max_rows}. Suggestion: raise `max_pool_rows` or load fewer files."
    )]
    LimitsExceeded { rows: usize, max_rows: u32 },

    #[error(
        "[SNAPAUD_AUDIT_002] sink error: {message}. Suggestion: check the output destination and retry."
    )]
    SinkError { message: String },
}

impl AuditError {
    pub fn code(&self) -> &'static str {
        match self {
            AuditError::LimitsExceeded { .. } => error_codes::AUDIT_LIMITS_EXCEEDED,
            AuditError::SinkError { .. } => error_codes::AUDIT_SINK_ERROR,
        }
    }
}

/// A versioned collection of audit results for one query over the loaded
/// sources.
///
/// The `version` field indicates the schema version for forwards
/// compatibility. `complete == false` means the run was cut short (for
/// example by the pool-size rail) and `warnings` explains why; the CLI
/// prints warnings to stderr as `Warning: ...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Schema version (currently "1").
    pub version: String,
    /// The column the timelines were keyed on, if one resolved.
    pub identifier_column: Option<String>,
    /// Results in group-major order.
    pub results: Vec<AuditResult>,
    /// Number of source files that contributed to the pool.
    pub files_loaded: usize,
    /// Number of rows that survived filtering (equals `results.len()`).
    pub rows_matched: usize,
    #[serde(default = "default_complete")]
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

fn default_complete() -> bool {
    true
}

impl AuditReport {
    pub const SCHEMA_VERSION: &'static str = "1";

    pub fn new(
        identifier_column: Option<String>,
        results: Vec<AuditResult>,
        files_loaded: usize,
    ) -> AuditReport {
        let rows_matched = results.len();
        AuditReport {
            version: Self::SCHEMA_VERSION.to_string(),
            identifier_column,
            results,
            files_loaded,
            rows_matched,
            complete: true,
            warnings: Vec::new(),
        }
    }

    /// An empty report for degraded states (no files, unresolved
    /// identifier, or a refused pool).
    pub fn empty(files_loaded: usize) -> AuditReport {
        AuditReport::new(None, Vec::new(), files_loaded)
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
        self.complete = false;
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
