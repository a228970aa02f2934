//! Streaming seam for report writers.
//!
//! External writers (a CSV stream, a UI table) implement [`ReportSink`]
//! and receive results one at a time in group-major order.

use crate::audit::{AuditError, AuditResult};

/// Trait for streaming audit results to a consumer.
pub trait ReportSink {
    /// Called once before any results are emitted.
    ///
    /// Default is a no-op so sinks that don't need setup can ignore it.
    fn begin(&mut self) -> Result<(), AuditError> {
        Ok(())
    }

    fn emit(&mut self, result: AuditResult) -> Result<(), AuditError>;

    fn finish(&mut self) -> Result<(), AuditError> {
        Ok(())
    }
}

/// A sink that collects results into a Vec.
#[derive(Default)]
pub struct VecSink {
    results: Vec<AuditResult>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_results(self) -> Vec<AuditResult> {
        self.results
    }
}

impl ReportSink for VecSink {
    fn emit(&mut self, result: AuditResult) -> Result<(), AuditError> {
        self.results.push(result);
        Ok(())
    }
}

/// A sink that forwards results to a callback.
pub struct CallbackSink<F: FnMut(AuditResult)> {
    f: F,
}

impl<F: FnMut(AuditResult)> CallbackSink<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: FnMut(AuditResult)> ReportSink for CallbackSink<F> {
    fn emit(&mut self, result: AuditResult) -> Result<(), AuditError> {
        (self.f)(result);
        Ok(())
    }
}
