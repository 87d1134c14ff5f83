//! Symbol-to-row resolution
//!
//! Maps the ordered symbol list read from the spreadsheet onto price rows
//! from a ticker snapshot. Output order follows input order; symbols the
//! snapshot does not cover are skipped, never padded.

use crate::market::TickerEntry;
use crate::sheets::Row;
use std::collections::{HashMap, HashSet};

/// Flatten a row-major grid of cells into one ordered symbol list
///
/// The symbol range may span several rows or columns; cell order within
/// the grid is preserved.
pub fn flatten_cells(grid: Vec<Row>) -> Vec<String> {
    grid.into_iter().flatten().collect()
}

/// Resolve each symbol, in input order, to a `[price, market cap, change%]`
/// row from the snapshot
///
/// The snapshot is first filtered down to the requested symbols and keyed
/// by symbol; when the provider lists a symbol more than once, the first
/// entry wins. A symbol with no entry contributes no row, so the output
/// may be shorter than the input.
pub fn resolve(symbols: &[String], snapshot: &[TickerEntry]) -> Vec<Row> {
    let requested: HashSet<&str> = symbols.iter().map(String::as_str).collect();

    let mut by_symbol: HashMap<&str, &TickerEntry> = HashMap::new();
    for entry in snapshot {
        if requested.contains(entry.symbol.as_str()) {
            by_symbol.entry(entry.symbol.as_str()).or_insert(entry);
        }
    }

    let mut rows = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        match by_symbol.get(symbol.as_str()) {
            Some(entry) => rows.push(to_row(entry)),
            None => {
                tracing::debug!(symbol = %symbol, "No ticker entry for symbol; skipping");
            }
        }
    }
    rows
}

/// Cell values for one matched entry. The percent suffix makes the
/// change column render as a percentage in the sheet.
fn to_row(entry: &TickerEntry) -> Row {
    vec![
        entry.price_usd.clone(),
        entry.market_cap_usd.clone(),
        format!("{}%", entry.percent_change_24h),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(symbol: &str, price: &str, cap: &str, change: &str) -> TickerEntry {
        TickerEntry {
            symbol: symbol.to_string(),
            price_usd: price.to_string(),
            market_cap_usd: cap.to_string(),
            percent_change_24h: change.to_string(),
        }
    }

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_preserves_input_order() {
        let snapshot = vec![
            entry("ETH", "300", "3.3e10", "-1.4"),
            entry("BTC", "9000", "1.6e11", "2.1"),
        ];

        let rows = resolve(&symbols(&["BTC", "ETH"]), &snapshot);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "9000");
        assert_eq!(rows[1][0], "300");
    }

    #[test]
    fn test_resolve_skips_unknown_symbols() {
        let snapshot = vec![
            entry("BTC", "9000", "1.6e11", "2.1"),
            entry("ETH", "300", "3.3e10", "-1.4"),
        ];

        let rows = resolve(&symbols(&["BTC", "FAKE", "ETH"]), &snapshot);
        assert_eq!(
            rows,
            vec![
                vec!["9000".to_string(), "1.6e11".to_string(), "2.1%".to_string()],
                vec!["300".to_string(), "3.3e10".to_string(), "-1.4%".to_string()],
            ]
        );
    }

    #[test]
    fn test_resolve_unknown_only_yields_empty() {
        let rows = resolve(&symbols(&["ZZZ"]), &[]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_resolve_empty_symbols() {
        let snapshot = vec![entry("BTC", "9000", "1.6e11", "2.1")];
        assert!(resolve(&[], &snapshot).is_empty());
    }

    #[test]
    fn test_resolve_output_never_longer_than_input() {
        let snapshot = vec![
            entry("BTC", "9000", "1.6e11", "2.1"),
            entry("ETH", "300", "3.3e10", "-1.4"),
            entry("XRP", "0.5", "2.0e10", "0.0"),
        ];

        let input = symbols(&["ETH", "DOGE"]);
        let rows = resolve(&input, &snapshot);
        assert!(rows.len() <= input.len());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_resolve_percent_suffix() {
        let snapshot = vec![entry("BTC", "9000", "1.6e11", "3.5")];
        let rows = resolve(&symbols(&["BTC"]), &snapshot);
        assert_eq!(rows[0][2], "3.5%");
    }

    #[test]
    fn test_resolve_duplicate_input_symbols() {
        let snapshot = vec![entry("BTC", "9000", "1.6e11", "2.1")];
        let rows = resolve(&symbols(&["BTC", "BTC"]), &snapshot);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], rows[1]);
    }

    #[test]
    fn test_resolve_duplicate_snapshot_symbols_first_wins() {
        let snapshot = vec![
            entry("BTC", "9000", "1.6e11", "2.1"),
            entry("BTC", "9999", "9.9e11", "9.9"),
        ];

        let rows = resolve(&symbols(&["BTC"]), &snapshot);
        assert_eq!(rows, vec![vec![
            "9000".to_string(),
            "1.6e11".to_string(),
            "2.1%".to_string(),
        ]]);
    }

    #[test]
    fn test_resolve_case_sensitive() {
        let snapshot = vec![entry("BTC", "9000", "1.6e11", "2.1")];
        assert!(resolve(&symbols(&["btc"]), &snapshot).is_empty());
    }

    #[test]
    fn test_resolve_idempotent() {
        let snapshot = vec![
            entry("BTC", "9000", "1.6e11", "2.1"),
            entry("ETH", "300", "3.3e10", "-1.4"),
        ];
        let input = symbols(&["ETH", "BTC", "FAKE"]);

        let first = resolve(&input, &snapshot);
        let second = resolve(&input, &snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn test_flatten_cells_row_major() {
        let grid = vec![
            vec!["BTC".to_string(), "ETH".to_string()],
            vec!["XRP".to_string()],
        ];
        assert_eq!(flatten_cells(grid), symbols(&["BTC", "ETH", "XRP"]));
    }

    #[test]
    fn test_flatten_cells_empty_grid() {
        assert!(flatten_cells(vec![]).is_empty());
    }
}
