//! Stable error codes referenced by error `Display` text and `code()`
//! accessors. Codes never change meaning once shipped.

pub(crate) const AUDIT_LIMITS_EXCEEDED: &str = "SNAPAUD_AUDIT_001";
pub(crate) const AUDIT_SINK_ERROR: &str = "SNAPAUD_AUDIT_002";

#[cfg(feature = "csv")]
pub(crate) const INGEST_READ: &str = "SNAPAUD_INGEST_001";
#[cfg(feature = "csv")]
pub(crate) const INGEST_MALFORMED: &str = "SNAPAUD_INGEST_002";
