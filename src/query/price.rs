//! Price search
//!
//! Parsing of the price input and the exact-match scan. Bad input is a
//! sentinel state, never an error.

use crate::catalog::{Item, MatchFlags};

/// Outcome of parsing the price-search input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceQuery {
    /// Blank input: nothing to search yet
    Empty,
    /// Non-numeric or non-positive input
    Invalid,
    /// A usable target price
    Target(u32),
}

/// Parse the raw price input field
pub fn parse_price_query(text: &str) -> PriceQuery {
    let text = text.trim();
    if text.is_empty() {
        return PriceQuery::Empty;
    }
    match text.parse::<i64>() {
        Ok(value) if value > 0 && value <= u32::MAX as i64 => PriceQuery::Target(value as u32),
        _ => PriceQuery::Invalid,
    }
}

/// Items whose price table contains the target in an enabled direction
pub fn match_by_price<'a>(items: &'a [Item], target: u32, flags: MatchFlags) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|item| item.matches_price(target, flags))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PriceTable;
    use std::collections::BTreeMap;

    fn item(name: &str, buy: &[(&str, u32)], sell: &[(&str, u32)]) -> Item {
        Item {
            name: name.to_string(),
            reading: name.to_string(),
            category: "草".to_string(),
            effect: String::new(),
            prices: Some(PriceTable {
                buy: buy.iter().map(|(k, v)| (k.to_string(), *v)).collect::<BTreeMap<_, _>>(),
                sell: sell.iter().map(|(k, v)| (k.to_string(), *v)).collect::<BTreeMap<_, _>>(),
            }),
            price: None,
        }
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_price_query("100"), PriceQuery::Target(100));
        assert_eq!(parse_price_query(" 750 "), PriceQuery::Target(750));
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(parse_price_query(""), PriceQuery::Empty);
        assert_eq!(parse_price_query("   "), PriceQuery::Empty);
    }

    #[test]
    fn test_parse_invalid_inputs() {
        assert_eq!(parse_price_query("abc"), PriceQuery::Invalid);
        assert_eq!(parse_price_query("-5"), PriceQuery::Invalid);
        assert_eq!(parse_price_query("0"), PriceQuery::Invalid);
        assert_eq!(parse_price_query("12x"), PriceQuery::Invalid);
    }

    #[test]
    fn test_match_by_price_scans_directions() {
        let items = vec![
            item("やくそう", &[("0", 100), ("+1", 120)], &[("0", 50)]),
            item("どくけし草", &[("0", 300)], &[("0", 150)]),
        ];

        let hits = match_by_price(&items, 120, MatchFlags { buy: true, sell: false });
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "やくそう");

        let hits = match_by_price(&items, 150, MatchFlags { buy: false, sell: true });
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "どくけし草");

        let hits = match_by_price(&items, 150, MatchFlags { buy: false, sell: false });
        assert!(hits.is_empty());
    }
}
