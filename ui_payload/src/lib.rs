//! View-model for UIs embedding the snapshot audit engine.
//!
//! Everything here is a read-only projection of the session's derived
//! snapshot, rendered to plain strings so a host UI (or a webview) can
//! display it without touching engine types.

use serde::Serialize;
use snapshot_audit::{AuditSession, Derived};
use std::collections::BTreeMap;

/// One file currently loaded into the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadFile {
    pub name: String,
    pub rows: usize,
}

/// One audit row, rendered to strings under the full column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadResult {
    /// Column → rendered value, for every full-mode column.
    pub values: BTreeMap<String, String>,
    /// Columns that changed since the previous snapshot of this record.
    pub changes: Vec<String>,
}

/// The complete read-only payload for one render of the audit view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditPayload {
    pub identifier_column: Option<String>,
    pub full_columns: Vec<String>,
    pub summary_columns: Vec<String>,
    pub files: Vec<PayloadFile>,
    pub rows_matched: usize,
    pub complete: bool,
    pub warnings: Vec<String>,
    pub results: Vec<PayloadResult>,
}

/// Build the payload for the session's current state.
///
/// Uses the memoized derived snapshot, so repeated calls on an unchanged
/// session recompute nothing in the engine.
pub fn build_payload(session: &mut AuditSession) -> AuditPayload {
    let files: Vec<PayloadFile> = session
        .sources()
        .iter()
        .map(|s| PayloadFile {
            name: s.name.clone(),
            rows: s.row_count(),
        })
        .collect();

    let derived = session.derived();
    from_derived(&derived, files)
}

fn from_derived(derived: &Derived, files: Vec<PayloadFile>) -> AuditPayload {
    let report = &derived.report;
    let results = report
        .results
        .iter()
        .map(|result| {
            let values = derived
                .full_columns
                .iter()
                .map(|column| (column.clone(), result.row.get_str(column).into_owned()))
                .collect();
            PayloadResult {
                values,
                changes: result.changes.iter().cloned().collect(),
            }
        })
        .collect();

    AuditPayload {
        identifier_column: report.identifier_column.clone(),
        full_columns: derived.full_columns.clone(),
        summary_columns: derived.summary_columns.clone(),
        files,
        rows_matched: report.rows_matched,
        complete: report.complete,
        warnings: report.warnings.clone(),
        results,
    }
}
