//! Logical-record identifier resolution.
//!
//! Picks the column that keys record timelines. Pure function of the pool's
//! column universe; stable for the lifetime of that universe.

/// Lowercase substrings that mark a column as the loan identifier.
const IDENTIFIER_HINTS: [&str; 3] = ["loan #", "loan#", "loan number"];

/// Select the identifier column from the universe, in discovery order.
///
/// The first column whose lowercase name contains one of the hint phrases
/// wins; otherwise the first column is the deterministic fallback. An empty
/// universe resolves to `None` and downstream stages degrade to empty
/// output.
pub fn resolve_identifier(columns: &[String]) -> Option<&str> {
    columns
        .iter()
        .find(|c| {
            let lower = c.to_lowercase();
            IDENTIFIER_HINTS.iter().any(|hint| lower.contains(hint))
        })
        .or_else(|| columns.first())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn prefers_hinted_column_over_earlier_columns() {
        let universe = cols(&["Status", "Loan Number", "Owner"]);
        assert_eq!(resolve_identifier(&universe), Some("Loan Number"));
    }

    #[test]
    fn hint_match_is_case_insensitive_substring() {
        let universe = cols(&["Status", "LOAN #"]);
        assert_eq!(resolve_identifier(&universe), Some("LOAN #"));
        let universe = cols(&["Servicer Loan#"]);
        assert_eq!(resolve_identifier(&universe), Some("Servicer Loan#"));
    }

    #[test]
    fn first_hinted_column_wins_in_discovery_order() {
        let universe = cols(&["Loan#", "Loan Number"]);
        assert_eq!(resolve_identifier(&universe), Some("Loan#"));
    }

    #[test]
    fn falls_back_to_first_column() {
        let universe = cols(&["Status", "Owner"]);
        assert_eq!(resolve_identifier(&universe), Some("Status"));
    }

    #[test]
    fn empty_universe_is_unresolved() {
        assert_eq!(resolve_identifier(&[]), None);
    }
}
