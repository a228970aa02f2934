//! JSON serialization of audit reports.

use crate::audit::AuditReport;
use serde::Serialize;

/// An [`AuditReport`] paired with the column order it should be rendered
/// with: the input contract of external report writers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditDocument<'a> {
    pub report: &'a AuditReport,
    pub columns: &'a [String],
    /// Label for the logical record(s) under review, typically the query.
    pub record_label: &'a str,
}

pub fn serialize_audit_report(report: &AuditReport) -> serde_json::Result<String> {
    serde_json::to_string(report)
}

pub fn serialize_audit_document(doc: &AuditDocument<'_>) -> serde_json::Result<String> {
    serde_json::to_string(doc)
}
