//! Report serialization: JSON documents and CSV export.

pub mod json;

#[cfg(feature = "csv")]
pub mod csv_write;
