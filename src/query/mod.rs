//! Query engine
//!
//! Pure functions over the catalog: text and category filtering,
//! grouping, display ordering, and intra-group sorting. Nothing in here
//! touches the terminal or the disk, so all of it is unit testable.

pub mod kana;
pub mod price;

pub use kana::compare_readings;
pub use price::{match_by_price, parse_price_query, PriceQuery};

use crate::catalog::Item;
use crate::save::IdentifiedSet;

/// Which item fields the text filter searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterScope {
    /// Name and reading only (the classic behavior)
    #[default]
    NameReading,
    /// Also match category and effect text
    Extended,
}

/// Category restriction on the catalog view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    fn keeps(&self, item: &Item) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }
}

/// Sort applied within each category group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Reading, gojūon order
    #[default]
    Name,
    /// Base price, ascending
    Price,
    /// Identified items first, then reading
    Identified,
}

impl SortKey {
    /// Cycle to the next sort key (for the UI's sort toggle)
    pub fn next(self) -> Self {
        match self {
            SortKey::Name => SortKey::Price,
            SortKey::Price => SortKey::Identified,
            SortKey::Identified => SortKey::Name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "名前順",
            SortKey::Price => "値段順",
            SortKey::Identified => "識別順",
        }
    }
}

/// Apply the text and category filters, preserving catalog order
pub fn filter_items<'a>(
    items: &'a [Item],
    filter: &str,
    category: &CategoryFilter,
    scope: FilterScope,
) -> Vec<&'a Item> {
    let needle = filter.trim().to_lowercase();
    items
        .iter()
        .filter(|item| matches_text(item, &needle, scope))
        .filter(|item| category.keeps(item))
        .collect()
}

fn matches_text(item: &Item, needle: &str, scope: FilterScope) -> bool {
    if needle.is_empty() {
        return true;
    }
    let in_base = item.name.to_lowercase().contains(needle)
        || item.reading.to_lowercase().contains(needle);
    match scope {
        FilterScope::NameReading => in_base,
        FilterScope::Extended => {
            in_base
                || item.category.to_lowercase().contains(needle)
                || item.effect.to_lowercase().contains(needle)
        }
    }
}

/// Partition items by category, keys in first-encounter order and
/// items in encounter order within each group
pub fn group_by_category<'a>(items: &[&'a Item]) -> Vec<(String, Vec<&'a Item>)> {
    let mut groups: Vec<(String, Vec<&'a Item>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(category, _)| *category == item.category) {
            Some((_, members)) => members.push(item),
            None => groups.push((item.category.clone(), vec![item])),
        }
    }
    groups
}

/// Arrange groups for display: the priority categories first, in their
/// given order, then everything else in first-encounter order
pub fn order_groups<'a>(
    mut groups: Vec<(String, Vec<&'a Item>)>,
    category_order: &[String],
) -> Vec<(String, Vec<&'a Item>)> {
    let mut ordered = Vec::with_capacity(groups.len());
    for category in category_order {
        if let Some(pos) = groups.iter().position(|(c, _)| c == category) {
            ordered.push(groups.remove(pos));
        }
    }
    ordered.extend(groups);
    ordered
}

/// Sort one group's items in place by the current sort key
pub fn sort_group(items: &mut [&Item], sort: SortKey, identified: &IdentifiedSet) {
    match sort {
        SortKey::Name => {
            items.sort_by(|a, b| compare_readings(&a.reading, &b.reading));
        }
        SortKey::Price => {
            items.sort_by_key(|item| item.base_price());
        }
        SortKey::Identified => {
            items.sort_by(|a, b| {
                let a_identified = identified.has(&a.name);
                let b_identified = identified.has(&b.name);
                b_identified
                    .cmp(&a_identified)
                    .then_with(|| compare_readings(&a.reading, &b.reading))
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Item, PriceTable};
    use std::collections::BTreeMap;

    fn item(name: &str, reading: &str, category: &str, buy: u32) -> Item {
        Item {
            name: name.to_string(),
            reading: reading.to_string(),
            category: category.to_string(),
            effect: format!("{}の効果", name),
            prices: Some(PriceTable {
                buy: BTreeMap::from([("0".to_string(), buy)]),
                sell: BTreeMap::from([("0".to_string(), buy / 2)]),
            }),
            price: None,
        }
    }

    fn sample() -> Vec<Item> {
        vec![
            item("鉄の盾", "てつのたて", "盾", 2000),
            item("やくそう", "やくそう", "草", 40),
            item("ふきとばしの杖", "ふきとばしのつえ", "杖", 800),
            item("どくのつぼ", "どくのつぼ", "壺", 1200),
            item("どくけし草", "どくけしそう", "草", 80),
        ]
    }

    fn empty_set(dir: &tempfile::TempDir) -> IdentifiedSet {
        IdentifiedSet::load(dir.path().join("ids.json"))
    }

    #[test]
    fn test_text_filter_substring_case_insensitive() {
        let items = vec![
            item("やくそう", "やくそう", "草", 40),
            item("どくのつぼ", "どくのつぼ", "壺", 1200),
        ];

        let kept = filter_items(&items, "つぼ", &CategoryFilter::All, FilterScope::NameReading);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "どくのつぼ");

        // ASCII is folded case-insensitively
        let items = vec![item("Elixir", "えりくさ", "壺", 5000)];
        let kept = filter_items(&items, "elix", &CategoryFilter::All, FilterScope::NameReading);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_text_filter_matches_reading() {
        let items = sample();
        let kept = filter_items(&items, "どくけし", &CategoryFilter::All, FilterScope::NameReading);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "どくけし草");
    }

    #[test]
    fn test_extended_scope_searches_effect() {
        let items = sample();
        // "効果" only appears in effect text
        let narrow = filter_items(&items, "の効果", &CategoryFilter::All, FilterScope::NameReading);
        assert!(narrow.is_empty());
        let wide = filter_items(&items, "の効果", &CategoryFilter::All, FilterScope::Extended);
        assert_eq!(wide.len(), items.len());
    }

    #[test]
    fn test_category_filter() {
        let items = sample();
        let kept = filter_items(
            &items,
            "",
            &CategoryFilter::Only("草".to_string()),
            FilterScope::NameReading,
        );
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|i| i.category == "草"));
    }

    #[test]
    fn test_grouping_preserves_encounter_order() {
        let items = sample();
        let refs: Vec<&Item> = items.iter().collect();
        let groups = group_by_category(&refs);

        // Keys in first-encounter order
        let keys: Vec<&str> = groups.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(keys, ["盾", "草", "杖", "壺"]);

        // Members in encounter order
        let (_, kusa) = groups.iter().find(|(c, _)| c == "草").unwrap();
        assert_eq!(kusa[0].name, "やくそう");
        assert_eq!(kusa[1].name, "どくけし草");
    }

    #[test]
    fn test_display_order_priority_then_encountered() {
        let order: Vec<String> = ["草", "杖", "剣", "盾", "巻物", "指輪", "壺"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let items = vec![
            item("こんぼう", "こんぼう", "剣", 100),
            item("やくそう", "やくそう", "草", 40),
            item("ふきとばしの杖", "ふきとばしのつえ", "杖", 800),
            item("パン", "ぱん", "食べ物", 100),
        ];
        let refs: Vec<&Item> = items.iter().collect();
        let ordered = order_groups(group_by_category(&refs), &order);

        let keys: Vec<&str> = ordered.iter().map(|(c, _)| c.as_str()).collect();
        // Priority categories first regardless of insertion order, the
        // unlisted 食べ物 bucket appended after
        assert_eq!(keys, ["草", "杖", "剣", "食べ物"]);
    }

    #[test]
    fn test_sort_by_name_is_gojuon() {
        let items = sample();
        let dir = tempfile::tempdir().unwrap();
        let set = empty_set(&dir);

        let mut refs: Vec<&Item> = items.iter().filter(|i| i.category == "草").collect();
        sort_group(&mut refs, SortKey::Name, &set);
        assert_eq!(refs[0].name, "どくけし草");
        assert_eq!(refs[1].name, "やくそう");
    }

    #[test]
    fn test_sort_by_price_ascending() {
        let items = sample();
        let dir = tempfile::tempdir().unwrap();
        let set = empty_set(&dir);

        let mut refs: Vec<&Item> = items.iter().collect();
        sort_group(&mut refs, SortKey::Price, &set);
        let prices: Vec<u32> = refs.iter().map(|i| i.base_price()).collect();
        assert_eq!(prices, [40, 80, 800, 1200, 2000]);
    }

    #[test]
    fn test_sort_identified_first_then_reading() {
        let a = item("アのくすり", "あのくすり", "草", 100);
        let b = item("カのくすり", "かのくすり", "草", 100);
        let c = item("サのくすり", "さのくすり", "草", 100);

        let dir = tempfile::tempdir().unwrap();
        let mut set = empty_set(&dir);
        set.toggle("アのくすり");
        set.toggle("サのくすり");

        let items = vec![b.clone(), c.clone(), a.clone()];
        let mut refs: Vec<&Item> = items.iter().collect();
        sort_group(&mut refs, SortKey::Identified, &set);

        let names: Vec<&str> = refs.iter().map(|i| i.name.as_str()).collect();
        // Identified (ア < サ) before unidentified (カ)
        assert_eq!(names, ["アのくすり", "サのくすり", "カのくすり"]);
    }
}
