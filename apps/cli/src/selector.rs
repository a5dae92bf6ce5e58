//! Target selection: which sheet rows get processed this run, and in what order.
//!
//! Output order follows the target list, not the sheet. An unknown target is a
//! configuration mismatch, not a fault — it is logged and skipped.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::models::ProjectRecord;

/// Returns the ordered subset of `records` whose symbol appears in `targets`
/// (case-insensitive). Duplicate targets and duplicate sheet rows collapse to
/// the first occurrence. `limit` caps the result for dry runs.
pub fn select_projects(
    records: &[ProjectRecord],
    targets: &[String],
    limit: Option<usize>,
) -> Vec<ProjectRecord> {
    let mut by_symbol: HashMap<String, &ProjectRecord> = HashMap::new();
    for record in records {
        by_symbol.entry(record.symbol.clone()).or_insert(record);
    }

    let mut seen = HashSet::new();
    let mut selected = Vec::new();
    for target in targets {
        let symbol = target.trim().to_lowercase();
        if symbol.is_empty() || !seen.insert(symbol.clone()) {
            continue;
        }
        match by_symbol.get(&symbol) {
            Some(record) => selected.push((*record).clone()),
            None => warn!("Target symbol '{symbol}' not found in score sheet, skipping"),
        }
    }

    if let Some(cap) = limit {
        selected.truncate(cap);
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BenchmarkInputs;

    fn record(name: &str, symbol: &str) -> ProjectRecord {
        ProjectRecord {
            name: name.to_string(),
            symbol: symbol.to_string(),
            sector: "DeFi".to_string(),
            scores: BenchmarkInputs::default(),
        }
    }

    fn targets(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_selection_follows_target_order() {
        let records = vec![
            record("Algorand", "algo"),
            record("Convex Finance", "cvx"),
            record("Solana", "sol"),
        ];
        let selected = select_projects(&records, &targets(&["sol", "algo"]), None);
        let symbols: Vec<&str> = selected.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["sol", "algo"]);
    }

    #[test]
    fn test_selection_is_case_insensitive() {
        let records = vec![record("Convex Finance", "cvx")];
        let selected = select_projects(&records, &targets(&["CVX"]), None);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Convex Finance");
    }

    #[test]
    fn test_unknown_target_is_skipped_not_an_error() {
        let records = vec![record("Algorand", "algo")];
        let selected = select_projects(&records, &targets(&["algo", "xyz"]), None);
        let symbols: Vec<&str> = selected.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["algo"]);
    }

    #[test]
    fn test_duplicate_targets_collapse() {
        let records = vec![record("Algorand", "algo")];
        let selected = select_projects(&records, &targets(&["algo", "ALGO", "algo"]), None);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_limit_caps_selection() {
        let records = vec![
            record("Algorand", "algo"),
            record("Convex Finance", "cvx"),
            record("Solana", "sol"),
        ];
        let selected = select_projects(&records, &targets(&["algo", "cvx", "sol"]), Some(2));
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[1].symbol, "cvx");
    }

    #[test]
    fn test_empty_targets_select_nothing() {
        let records = vec![record("Algorand", "algo")];
        assert!(select_projects(&records, &[], None).is_empty());
    }
}
