//! Configuration for the audit engine.
//!
//! `AuditConfig` centralizes the policy knobs so variant behaviors are
//! explicit configuration choices rather than scattered constants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Equality policy for grouping rows into record timelines.
///
/// Exactly one policy applies per run; the engine never mixes key
/// equalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMatch {
    /// Raw identifier strings must match byte-for-byte.
    Exact,
    /// Identifiers are trimmed and lowercased before comparison, matching
    /// the filter engine's equality.
    Normalized,
}

/// Tiebreak order for full-mode column projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnOrder {
    /// Pool discovery order (per-file header order, files in load order).
    FirstObserved,
    /// Lexicographic order.
    Alphabetical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub key_match: KeyMatch,
    pub column_order: ColumnOrder,
    /// Hardening rail: pools larger than this are refused up front rather
    /// than silently chewing memory.
    pub max_pool_rows: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            key_match: KeyMatch::Normalized,
            column_order: ColumnOrder::FirstObserved,
            max_pool_rows: 10_000_000,
        }
    }
}

impl AuditConfig {
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder {
            inner: AuditConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pool_rows == 0 {
            return Err(ConfigError::NonPositiveLimit {
                field: "max_pool_rows",
                value: 0,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero (got {value})")]
    NonPositiveLimit { field: &'static str, value: u64 },
}

#[derive(Debug, Clone, Default)]
pub struct AuditConfigBuilder {
    inner: AuditConfig,
}

impl AuditConfigBuilder {
    pub fn new() -> Self {
        AuditConfig::builder()
    }

    pub fn key_match(mut self, value: KeyMatch) -> Self {
        self.inner.key_match = value;
        self
    }

    pub fn column_order(mut self, value: ColumnOrder) -> Self {
        self.inner.column_order = value;
        self
    }

    pub fn max_pool_rows(mut self, value: u32) -> Self {
        self.inner.max_pool_rows = value;
        self
    }

    pub fn build(self) -> Result<AuditConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
