//! Item definitions
//!
//! Core item record types and price lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which side of a shop transaction a price belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceKind {
    Buy,
    Sell,
}

impl PriceKind {
    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            PriceKind::Buy => "買",
            PriceKind::Sell => "売",
        }
    }
}

/// Which price directions an exact-price search should consider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFlags {
    pub buy: bool,
    pub sell: bool,
}

impl Default for MatchFlags {
    fn default() -> Self {
        Self { buy: true, sell: true }
    }
}

impl MatchFlags {
    /// Neither direction enabled: no item can match
    pub fn is_empty(&self) -> bool {
        !self.buy && !self.sell
    }
}

/// The modifier level used when a requested level has no entry
pub const BASE_MODIFIER: &str = "0";

/// Buy/sell prices keyed by modifier level ("0", "+1", "-2", ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    #[serde(default)]
    pub buy: BTreeMap<String, u32>,
    #[serde(default)]
    pub sell: BTreeMap<String, u32>,
}

impl PriceTable {
    fn side(&self, kind: PriceKind) -> &BTreeMap<String, u32> {
        match kind {
            PriceKind::Buy => &self.buy,
            PriceKind::Sell => &self.sell,
        }
    }
}

/// A single catalog record
///
/// `name` is unique across the catalog and is the join key for
/// identification state. Prices come either as a modifier-level table
/// (`prices`) or as a single legacy flat value (`price`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Phonetic sort key (kana)
    pub reading: String,
    pub category: String,
    /// Free-text effect description
    #[serde(default)]
    pub effect: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<PriceTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
}

impl Item {
    /// Price for a direction at a modifier level.
    ///
    /// Falls back to the base modifier "0" when the exact level has no
    /// entry, and to 0 when the table has neither. Legacy flat-price
    /// items report the flat value for every lookup.
    pub fn price_at(&self, kind: PriceKind, modifier: &str) -> u32 {
        if let Some(table) = &self.prices {
            let side = table.side(kind);
            return side
                .get(modifier)
                .or_else(|| side.get(BASE_MODIFIER))
                .copied()
                .unwrap_or(0);
        }
        self.price.unwrap_or(0)
    }

    /// The single price facet used for numeric sorting: buy at modifier
    /// "0", or the flat value for legacy records.
    pub fn base_price(&self) -> u32 {
        self.price_at(PriceKind::Buy, BASE_MODIFIER)
    }

    /// Exact-price match across every modifier level of each enabled
    /// direction. A player may see any modifier's price in the shop, so
    /// the scan covers the whole table, not just the base level.
    pub fn matches_price(&self, target: u32, flags: MatchFlags) -> bool {
        if flags.is_empty() {
            return false;
        }
        match (&self.prices, self.price) {
            (Some(table), _) => {
                (flags.buy && table.buy.values().any(|&p| p == target))
                    || (flags.sell && table.sell.values().any(|&p| p == target))
            }
            // Legacy records have one undirected price.
            (None, Some(flat)) => flat == target,
            (None, None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_item() -> Item {
        Item {
            name: "やくそう".to_string(),
            reading: "やくそう".to_string(),
            category: "草".to_string(),
            effect: "HPを回復する".to_string(),
            prices: Some(PriceTable {
                buy: BTreeMap::from([("0".to_string(), 100), ("+1".to_string(), 120)]),
                sell: BTreeMap::from([("0".to_string(), 50)]),
            }),
            price: None,
        }
    }

    fn flat_item() -> Item {
        Item {
            name: "つるはし".to_string(),
            reading: "つるはし".to_string(),
            category: "剣".to_string(),
            effect: String::new(),
            prices: None,
            price: Some(240),
        }
    }

    #[test]
    fn test_price_at_exact_and_fallback() {
        let item = table_item();
        assert_eq!(item.price_at(PriceKind::Buy, "+1"), 120);
        // No "+1" sell entry, falls back to "0"
        assert_eq!(item.price_at(PriceKind::Sell, "+1"), 50);
        assert_eq!(item.price_at(PriceKind::Buy, "0"), 100);
    }

    #[test]
    fn test_price_at_empty_side() {
        let item = Item {
            prices: Some(PriceTable::default()),
            ..table_item()
        };
        assert_eq!(item.price_at(PriceKind::Buy, "0"), 0);
        assert_eq!(item.price_at(PriceKind::Sell, "+3"), 0);
    }

    #[test]
    fn test_base_price_facets() {
        assert_eq!(table_item().base_price(), 100);
        assert_eq!(flat_item().base_price(), 240);
    }

    #[test]
    fn test_match_respects_direction_flags() {
        let item = table_item();
        let buy_only = MatchFlags { buy: true, sell: false };
        let sell_only = MatchFlags { buy: false, sell: true };
        let neither = MatchFlags { buy: false, sell: false };

        // 120 only exists in the buy table (modifier "+1")
        assert!(item.matches_price(120, buy_only));
        assert!(!item.matches_price(120, sell_only));

        // 50 only exists in the sell table
        assert!(item.matches_price(50, sell_only));
        assert!(!item.matches_price(50, buy_only));

        assert!(!item.matches_price(120, neither));
        assert!(!item.matches_price(50, neither));
    }

    #[test]
    fn test_match_scans_all_modifier_levels() {
        let item = table_item();
        assert!(item.matches_price(120, MatchFlags::default()));
        assert!(!item.matches_price(121, MatchFlags::default()));
    }

    #[test]
    fn test_flat_price_match() {
        let item = flat_item();
        assert!(item.matches_price(240, MatchFlags { buy: true, sell: false }));
        assert!(item.matches_price(240, MatchFlags { buy: false, sell: true }));
        assert!(!item.matches_price(240, MatchFlags { buy: false, sell: false }));
        assert!(!item.matches_price(241, MatchFlags::default()));
    }
}
