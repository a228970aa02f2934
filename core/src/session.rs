//! Session state and memoized derivation.
//!
//! `AuditSession` owns the mutable application state (loaded sources,
//! primary query, secondary filters, config) behind reducer-style
//! mutators. Every derived collection is a pure function of that state,
//! recomputed only when the state's revision changes: repeated
//! [`AuditSession::derived`] calls on an unchanged session return the same
//! shared snapshot.

use crate::audit::AuditReport;
use crate::config::AuditConfig;
use crate::engine::run_audit;
use crate::filter::{Filter, FilterId};
use crate::pool::RowPool;
use crate::projection::{ColumnMode, project_columns};
use crate::row::SourceFile;
use std::sync::Arc;

/// Everything the presentation layer reads, computed in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub report: AuditReport,
    /// Full-mode column order for the current results.
    pub full_columns: Vec<String>,
    /// Summary-mode column order for the current results.
    pub summary_columns: Vec<String>,
    /// The pool's column universe in discovery order.
    pub universe: Vec<String>,
}

/// Holds the current files, query, and filters, plus the memoized derived
/// snapshot.
#[derive(Debug, Default)]
pub struct AuditSession {
    sources: Vec<SourceFile>,
    query: String,
    filters: Vec<Filter>,
    config: AuditConfig,
    next_filter_id: u64,
    revision: u64,
    cached: Option<(u64, Arc<Derived>)>,
}

impl AuditSession {
    pub fn new() -> AuditSession {
        AuditSession::default()
    }

    pub fn with_config(config: AuditConfig) -> AuditSession {
        AuditSession {
            config,
            ..AuditSession::default()
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn sources(&self) -> &[SourceFile] {
        &self.sources
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    pub fn add_source(&mut self, source: SourceFile) {
        self.sources.push(source);
        self.touch();
    }

    /// Remove the source with the given display name. Returns whether a
    /// source was removed.
    pub fn remove_source(&mut self, name: &str) -> bool {
        let before = self.sources.len();
        self.sources.retain(|s| s.name != name);
        let removed = self.sources.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn clear_sources(&mut self) {
        if !self.sources.is_empty() {
            self.sources.clear();
            self.touch();
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.touch();
        }
    }

    pub fn add_filter(&mut self, column: impl Into<String>, value: impl Into<String>) -> FilterId {
        let id = FilterId(self.next_filter_id);
        self.next_filter_id += 1;
        self.filters.push(Filter::new(id, column, value));
        self.touch();
        id
    }

    /// Edit an existing filter in place. Returns whether the filter exists.
    pub fn set_filter(
        &mut self,
        id: FilterId,
        column: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        match self.filters.iter_mut().find(|f| f.id == id) {
            Some(filter) => {
                filter.column = column.into();
                filter.value = value.into();
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn remove_filter(&mut self, id: FilterId) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.id != id);
        let removed = self.filters.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn set_config(&mut self, config: AuditConfig) {
        if config != self.config {
            self.config = config;
            self.touch();
        }
    }

    /// The derived snapshot for the current state.
    ///
    /// Recomputes only when a mutator ran since the last call; otherwise
    /// returns the cached `Arc` unchanged. A pool refused by the size rail
    /// degrades to an empty, incomplete report with a warning instead of
    /// an error: for a session the rail is a display state, not a fault.
    pub fn derived(&mut self) -> Arc<Derived> {
        if let Some((revision, snapshot)) = &self.cached {
            if *revision == self.revision {
                return Arc::clone(snapshot);
            }
        }

        let snapshot = Arc::new(self.compute());
        self.cached = Some((self.revision, Arc::clone(&snapshot)));
        snapshot
    }

    fn compute(&self) -> Derived {
        let universe = RowPool::new(&self.sources).columns().to_vec();

        let report = match run_audit(&self.sources, &self.query, &self.filters, &self.config) {
            Ok(report) => report,
            Err(err) => {
                let mut report = AuditReport::empty(self.sources.len());
                report.add_warning(err.to_string());
                report
            }
        };

        let identifier = report.identifier_column.as_deref();
        let full_columns = project_columns(
            &report.results,
            &universe,
            identifier,
            ColumnMode::Full,
            &self.config,
        );
        let summary_columns = project_columns(
            &report.results,
            &universe,
            identifier,
            ColumnMode::Summary,
            &self.config,
        );

        Derived {
            report,
            full_columns,
            summary_columns,
            universe,
        }
    }
}
