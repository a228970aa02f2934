//! Row filtering: the primary identifier query plus secondary column
//! constraints.
//!
//! Matching normalizes both sides (trim + lowercase) and accepts
//! comma-delimited literal lists. Output preserves pool order: the filter
//! is an order-preserving subsequence selection, nothing more.

use crate::pool::RowPool;
use crate::row::Row;
use serde::{Deserialize, Serialize};

/// Opaque identity of a secondary filter within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FilterId(pub u64);

impl std::fmt::Display for FilterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A secondary column/value constraint.
///
/// `value` may hold several accepted literals separated by commas. A filter
/// is *active* only when both `column` and the trimmed `value` are
/// non-empty; inactive filters are ignored. Filters are conjunctive and
/// their insertion order carries no semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub id: FilterId,
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn new(id: FilterId, column: impl Into<String>, value: impl Into<String>) -> Filter {
        Filter {
            id,
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.column.is_empty() && !self.value.trim().is_empty()
    }
}

/// Split a raw query string into its accepted literals: comma-separated,
/// trimmed, lowercased, empties discarded.
pub fn parse_literals(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|piece| piece.trim().to_lowercase())
        .filter(|piece| !piece.is_empty())
        .collect()
}

fn matches_literals(row: &Row, column: &str, literals: &[String]) -> bool {
    let value = row.get_str(column);
    let normalized = value.trim().to_lowercase();
    literals.iter().any(|lit| *lit == normalized)
}

/// Narrow the pool to rows matching the primary query and every active
/// secondary filter.
///
/// An unresolved identifier grounds nothing, so the result is empty
/// regardless of query content. An empty primary query skips the primary
/// check entirely. A row lacking an active filter's column never matches
/// it: the absent value normalizes to `""`, which is never in a non-empty
/// literal set.
pub fn filter_rows<'a>(
    pool: &RowPool<'a>,
    query: &str,
    identifier: Option<&str>,
    filters: &[Filter],
) -> Vec<&'a Row> {
    let identifier = match identifier {
        Some(column) => column,
        None => return Vec::new(),
    };

    let primary = parse_literals(query);
    let secondary: Vec<(&str, Vec<String>)> = filters
        .iter()
        .filter(|f| f.is_active())
        .map(|f| (f.column.as_str(), parse_literals(&f.value)))
        .collect();

    pool.rows()
        .filter(|row| {
            if !primary.is_empty() && !matches_literals(row, identifier, &primary) {
                return false;
            }
            secondary
                .iter()
                .all(|(column, literals)| matches_literals(row, column, literals))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_are_trimmed_lowercased_and_skip_empties() {
        assert_eq!(parse_literals(" 100 , ABC ,,  "), vec!["100", "abc"]);
        assert!(parse_literals("  ").is_empty());
        assert!(parse_literals(",,,").is_empty());
    }

    #[test]
    fn inactive_filters_are_ignored() {
        assert!(!Filter::new(FilterId(0), "", "x").is_active());
        assert!(!Filter::new(FilterId(0), "Status", "   ").is_active());
        assert!(Filter::new(FilterId(0), "Status", "Open").is_active());
    }
}
