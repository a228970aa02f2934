//! CSV ingestion adapter.
//!
//! Decodes uploaded CSV exports into [`SourceFile`]s. Each input decodes
//! independently: a malformed file is reported as its own failure and never
//! aborts the others. Ingestion is the only stage that produces true
//! faults; everything downstream degrades instead of erroring.

use crate::error_codes;
use crate::row::{Row, SOURCE_FILE_FIELD, Scalar, SourceFile};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    #[error("[SNAPAUD_INGEST_001] failed to read '{file}': {message}. Suggestion: check the path and permissions.")]
    Read { file: String, message: String },

    #[error("[SNAPAUD_INGEST_002] malformed record in '{file}' at line {line}: {message}. Suggestion: re-export the file or fix the offending row.")]
    Malformed {
        file: String,
        line: u64,
        message: String,
    },
}

impl IngestError {
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::Read { .. } => error_codes::INGEST_READ,
            IngestError::Malformed { .. } => error_codes::INGEST_MALFORMED,
        }
    }

    pub fn file(&self) -> &str {
        match self {
            IngestError::Read { file, .. } => file,
            IngestError::Malformed { file, .. } => file,
        }
    }
}

/// Decode one CSV stream into a [`SourceFile`] tagged with `file_name`.
///
/// The header row becomes the column order; a literal reserved-field header
/// is dropped (the tag wins). Cell values stay text: type coercion beyond
/// strings is out of scope. Ragged records are malformed input, reported
/// with their line number.
pub fn decode_csv<R: Read>(reader: R, file_name: &str) -> Result<SourceFile, IngestError> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| malformed(file_name, &e))?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| malformed(file_name, &e))?;
        let fields = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| header.as_str() != SOURCE_FILE_FIELD)
            .map(|(header, cell)| (header.clone(), Scalar::Text(cell.to_string())))
            .collect::<Vec<_>>();
        rows.push(Row::new(file_name, fields));
    }

    let columns = headers
        .into_iter()
        .filter(|h| h != SOURCE_FILE_FIELD)
        .collect();

    Ok(SourceFile {
        name: file_name.to_string(),
        columns,
        rows,
    })
}

/// Decode one CSV file from disk, named by its file name component.
pub fn decode_csv_path(path: &Path) -> Result<SourceFile, IngestError> {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let file = File::open(path).map_err(|e| IngestError::Read {
        file: name.clone(),
        message: e.to_string(),
    })?;
    decode_csv(file, &name)
}

/// Decode many files, one task per file.
///
/// Results come back in input order and a failure in one file never
/// prevents the others from decoding. All tasks are joined before this
/// returns, so the caller's pool is valid as soon as it sees the results.
pub fn ingest_paths(paths: &[PathBuf]) -> Vec<Result<SourceFile, IngestError>> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|path| scope.spawn(move || decode_csv_path(path)))
            .collect();
        handles
            .into_iter()
            .zip(paths)
            .map(|(handle, path)| match handle.join() {
                Ok(result) => result,
                Err(_) => Err(IngestError::Read {
                    file: path.display().to_string(),
                    message: "decode task panicked".to_string(),
                }),
            })
            .collect()
    })
}

fn malformed(file: &str, err: &csv::Error) -> IngestError {
    let line = match err.kind() {
        csv::ErrorKind::UnequalLengths { pos, .. } => {
            pos.as_ref().map(|p| p.line()).unwrap_or(0)
        }
        _ => err.position().map(|p| p.line()).unwrap_or(0),
    };
    IngestError::Malformed {
        file: file.to_string(),
        line,
        message: err.to_string(),
    }
}
