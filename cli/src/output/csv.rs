use anyhow::Result;
use snapshot_audit::{AuditReport, write_results_csv};
use std::io::Write;

pub fn write_csv_report<W: Write>(
    w: &mut W,
    report: &AuditReport,
    columns: &[String],
) -> Result<()> {
    write_results_csv(w, &report.results, columns)?;
    Ok(())
}
