use anyhow::Result;
use snapshot_audit::{AuditReport, KeyMatch, SOURCE_FILE_FIELD};
use std::io::Write;

/// Render a report as a per-record timeline.
///
/// Results arrive group-major, so a record's snapshots are contiguous; the
/// previous row of the current record is always the previously printed one.
/// Group boundaries are detected with the same key equality the engine
/// grouped with, so exact-distinct records never collapse into one block.
pub fn write_text_report<W: Write>(
    w: &mut W,
    report: &AuditReport,
    _columns: &[String],
    key_match: KeyMatch,
    quiet: bool,
) -> Result<()> {
    if report.results.is_empty() {
        writeln!(w, "No matching snapshots.")?;
        write_summary(w, report)?;
        return Ok(());
    }

    let identifier = report.identifier_column.as_deref().unwrap_or("?");

    if !quiet {
        let mut prev: Option<&snapshot_audit::AuditResult> = None;
        for result in &report.results {
            let record = result.row.get_str(identifier);
            let is_new_group = match prev {
                Some(p) => {
                    let prev_record = p.row.get_str(identifier);
                    match key_match {
                        KeyMatch::Exact => prev_record != record,
                        KeyMatch::Normalized => {
                            prev_record.trim().to_lowercase() != record.trim().to_lowercase()
                        }
                    }
                }
                None => true,
            };
            if is_new_group {
                if prev.is_some() {
                    writeln!(w)?;
                }
                writeln!(w, "Record \"{}\":", record)?;
            }

            let source = result.row.get_str(SOURCE_FILE_FIELD);
            if result.changes.is_empty() {
                let label = if is_new_group { "baseline" } else { "unchanged" };
                writeln!(w, "  {}: {}", source, label)?;
            } else {
                for column in &result.changes {
                    let old = prev
                        .map(|p| p.row.get_str(column).into_owned())
                        .unwrap_or_default();
                    let new = result.row.get_str(column);
                    writeln!(w, "  {}: {}: \"{}\" -> \"{}\"", source, column, old, new)?;
                }
            }
            prev = Some(result);
        }
        writeln!(w)?;
    }

    write_summary(w, report)?;
    Ok(())
}

fn write_summary<W: Write>(w: &mut W, report: &AuditReport) -> Result<()> {
    let changed = report
        .results
        .iter()
        .filter(|r| !r.changes.is_empty())
        .count();
    writeln!(
        w,
        "{} snapshot(s) matched across {} file(s), {} with changes",
        report.rows_matched, report.files_loaded, changed
    )?;
    Ok(())
}
