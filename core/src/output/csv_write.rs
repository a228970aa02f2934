//! CSV export of audit results.
//!
//! Writes the result set under a given column order, with a trailing
//! `Changed_Fields` column carrying each row's change set.

use crate::audit::{AuditError, AuditResult};
use std::io::Write;

/// Header of the trailing change-set column.
pub const CHANGED_FIELDS_COLUMN: &str = "Changed_Fields";

/// Write `results` as CSV under `columns`.
///
/// Exporting zero results or zero columns is a no-op, not an error.
pub fn write_results_csv<W: Write>(
    writer: W,
    results: &[AuditResult],
    columns: &[String],
) -> Result<(), AuditError> {
    if results.is_empty() || columns.is_empty() {
        return Ok(());
    }

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = columns.iter().map(String::as_str).collect();
    header.push(CHANGED_FIELDS_COLUMN);
    wtr.write_record(&header).map_err(sink_error)?;

    for result in results {
        let mut record: Vec<String> = columns
            .iter()
            .map(|column| result.row.get_str(column).into_owned())
            .collect();
        record.push(
            result
                .changes
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(";"),
        );
        wtr.write_record(&record).map_err(sink_error)?;
    }

    wtr.flush().map_err(|e| AuditError::SinkError {
        message: e.to_string(),
    })
}

fn sink_error(err: csv::Error) -> AuditError {
    AuditError::SinkError {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{Row, Scalar};
    use std::collections::BTreeSet;

    fn result(source: &str, id: &str, status: &str, changes: &[&str]) -> AuditResult {
        let row = Row::new(
            source,
            vec![
                ("LoanNumber".to_string(), Scalar::from(id)),
                ("Status".to_string(), Scalar::from(status)),
            ],
        );
        AuditResult {
            row,
            changes: changes.iter().map(|c| c.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn writes_header_rows_and_change_sets() {
        let results = vec![
            result("a.csv", "100", "Open", &[]),
            result("b.csv", "100", "Closed", &["Status"]),
        ];
        let cols = columns(&["Found_In_File", "LoanNumber", "Status"]);

        let mut out = Vec::new();
        write_results_csv(&mut out, &results, &cols).expect("write csv");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            text,
            "Found_In_File,LoanNumber,Status,Changed_Fields\n\
             a.csv,100,Open,\n\
             b.csv,100,Closed,Status\n"
        );
    }

    #[test]
    fn empty_results_write_nothing() {
        let mut out = Vec::new();
        write_results_csv(&mut out, &[], &columns(&["A"])).expect("no-op");
        assert!(out.is_empty());
    }

    #[test]
    fn empty_columns_write_nothing() {
        let results = vec![result("a.csv", "100", "Open", &[])];
        let mut out = Vec::new();
        write_results_csv(&mut out, &results, &[]).expect("no-op");
        assert!(out.is_empty());
    }
}
