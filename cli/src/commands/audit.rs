use crate::output;
use crate::{ColumnsArg, KeyMatchArg, OutputFormat};
use anyhow::{Result, bail};
use snapshot_audit::{
    AuditConfig, ColumnMode, Filter, FilterId, KeyMatch, ingest_paths, project_columns, run_audit,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

pub fn run(
    files: &[String],
    query: &str,
    filter_args: &[String],
    columns: ColumnsArg,
    format: OutputFormat,
    key_match: Option<KeyMatchArg>,
    quiet: bool,
) -> Result<ExitCode> {
    let filters = parse_filter_args(filter_args)?;
    let config = build_config(key_match)?;

    let paths: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();
    let mut sources = Vec::new();
    let mut failures = 0usize;
    for outcome in ingest_paths(&paths) {
        match outcome {
            Ok(source) => sources.push(source),
            Err(e) => {
                failures += 1;
                eprintln!("Warning: skipping '{}': {}", e.file(), e);
            }
        }
    }
    if sources.is_empty() {
        bail!("none of the {} input file(s) could be ingested", failures);
    }

    let report = run_audit(&sources, query, &filters, &config)?;
    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }

    let mode = match columns {
        ColumnsArg::Full => ColumnMode::Full,
        ColumnsArg::Summary => ColumnMode::Summary,
    };
    let universe: Vec<String> = {
        let pool = snapshot_audit::RowPool::new(&sources);
        pool.columns().to_vec()
    };
    let column_order = project_columns(
        &report.results,
        &universe,
        report.identifier_column.as_deref(),
        mode,
        &config,
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match format {
        OutputFormat::Text => output::text::write_text_report(
            &mut handle,
            &report,
            &column_order,
            config.key_match,
            quiet,
        )?,
        OutputFormat::Json => output::json::write_json_report(&mut handle, &report, &column_order, query)?,
        OutputFormat::Csv => output::csv::write_csv_report(&mut handle, &report, &column_order)?,
    }
    handle.flush()?;

    if report.is_empty() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::from(0))
    }
}

fn build_config(key_match: Option<KeyMatchArg>) -> Result<AuditConfig> {
    let mut builder = AuditConfig::builder();
    if let Some(arg) = key_match {
        builder = builder.key_match(match arg {
            KeyMatchArg::Exact => KeyMatch::Exact,
            KeyMatchArg::Normalized => KeyMatch::Normalized,
        });
    }
    Ok(builder.build()?)
}

fn parse_filter_args(args: &[String]) -> Result<Vec<Filter>> {
    args.iter()
        .enumerate()
        .map(|(i, raw)| match raw.split_once('=') {
            Some((column, values)) if !column.trim().is_empty() => Ok(Filter::new(
                FilterId(i as u64),
                column.trim(),
                values.trim(),
            )),
            _ => bail!("invalid --filter '{raw}': expected COL=VALUES"),
        })
        .collect()
}
