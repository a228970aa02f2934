use anyhow::Result;
use snapshot_audit::{AuditDocument, AuditReport, serialize_audit_document};
use std::io::Write;

pub fn write_json_report<W: Write>(
    w: &mut W,
    report: &AuditReport,
    columns: &[String],
    record_label: &str,
) -> Result<()> {
    let doc = AuditDocument {
        report,
        columns,
        record_label,
    };
    let json = serialize_audit_document(&doc)?;
    writeln!(w, "{}", json)?;
    Ok(())
}
