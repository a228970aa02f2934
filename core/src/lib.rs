//! Snapshot Audit: grouping and field-level change detection for tabular
//! snapshot exports.
//!
//! This crate provides functionality for:
//! - Pooling rows from many loaded exports into one ordered master pool
//! - Resolving the identifier column that keys logical-record timelines
//! - Filtering rows by a primary identifier query plus secondary constraints
//! - Computing per-record change sets between consecutive snapshots
//! - Projecting the minimal column order for display or export
//!
//! # Quick Start
//!
//! ```ignore
//! use snapshot_audit::{AuditConfig, AuditSession, decode_csv};
//!
//! let mut session = AuditSession::new();
//! session.add_source(decode_csv(std::fs::File::open("a.csv")?, "a.csv")?);
//! session.add_source(decode_csv(std::fs::File::open("b.csv")?, "b.csv")?);
//! session.set_query("100");
//!
//! let derived = session.derived();
//! for result in &derived.report.results {
//!     println!("{:?} changed {:?}", result.row.source(), result.changes);
//! }
//! ```

mod audit;
mod config;
mod engine;
mod error_codes;
mod filter;
mod identifier;
#[cfg(feature = "csv")]
mod ingest;
mod output;
mod pool;
mod projection;
mod row;
mod session;
mod sink;

pub use audit::{AuditError, AuditReport, AuditResult};
pub use config::{AuditConfig, AuditConfigBuilder, ColumnOrder, ConfigError, KeyMatch};
pub use engine::{audit_rows, audit_rows_streaming, run_audit};
pub use filter::{Filter, FilterId, filter_rows, parse_literals};
pub use identifier::resolve_identifier;
#[cfg(feature = "csv")]
pub use ingest::{IngestError, decode_csv, decode_csv_path, ingest_paths};
#[cfg(feature = "csv")]
pub use output::csv_write::{CHANGED_FIELDS_COLUMN, write_results_csv};
pub use output::json::{AuditDocument, serialize_audit_document, serialize_audit_report};
pub use pool::RowPool;
pub use projection::{ColumnMode, project_columns};
pub use row::{Row, SOURCE_FILE_FIELD, Scalar, SourceFile};
pub use session::{AuditSession, Derived};
pub use sink::{CallbackSink, ReportSink, VecSink};
