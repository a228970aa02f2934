use anyhow::Result;
use snapshot_audit::{RowPool, ingest_paths, resolve_identifier};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

pub fn run(files: &[String]) -> Result<ExitCode> {
    let paths: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();
    let outcomes = ingest_paths(&paths);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let mut sources = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(source) => {
                writeln!(
                    handle,
                    "{}: {} rows, {} columns",
                    source.name,
                    source.row_count(),
                    source.columns.len()
                )?;
                sources.push(source);
            }
            Err(e) => {
                writeln!(handle, "{}: FAILED ({})", e.file(), e)?;
            }
        }
    }

    let pool = RowPool::new(&sources);
    writeln!(handle)?;
    writeln!(handle, "Pool: {} rows across {} file(s)", pool.row_count(), sources.len())?;
    writeln!(handle, "Columns: {}", pool.columns().join(", "))?;
    match resolve_identifier(pool.columns()) {
        Some(column) => writeln!(handle, "Identifier: {}", column)?,
        None => writeln!(handle, "Identifier: <unresolved>")?,
    }

    Ok(ExitCode::from(0))
}
