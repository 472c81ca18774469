//! Session controller
//!
//! Owns the catalog, the identification set, and the ephemeral query
//! state, and derives the view models the renderer draws from. Views
//! are rebuilt on demand, so every redraw reflects the latest state,
//! including an active price search after a toggle or reset.

use crate::catalog::{Catalog, Item, MatchFlags, PriceKind, BASE_MODIFIER};
use crate::query::{
    self, CategoryFilter, FilterScope, PriceQuery, SortKey,
};
use crate::save::IdentifiedSet;

/// Ephemeral UI query state; never persisted
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    pub filter: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
    pub price_input: String,
    pub price_flags: MatchFlags,
}

/// One catalog row as the renderer sees it
#[derive(Debug, Clone)]
pub struct ItemRow<'a> {
    pub item: &'a Item,
    pub identified: bool,
}

impl ItemRow<'_> {
    /// Display prices at the base modifier level
    pub fn buy_price(&self) -> u32 {
        self.item.price_at(PriceKind::Buy, BASE_MODIFIER)
    }

    pub fn sell_price(&self) -> u32 {
        self.item.price_at(PriceKind::Sell, BASE_MODIFIER)
    }
}

/// A rendered category section
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: String,
    pub items: Vec<ItemRow<'a>>,
}

/// Derived state of the price-search view
#[derive(Debug, Clone)]
pub enum PriceView<'a> {
    /// No input yet
    Idle,
    /// Non-numeric or non-positive input
    Invalid,
    /// Valid target, nothing matched
    NoMatch(u32),
    Matches {
        target: u32,
        groups: Vec<CategoryGroup<'a>>,
    },
}

/// The single top-level application state holder
pub struct Session {
    catalog: Catalog,
    identified: IdentifiedSet,
    query: QueryState,
    filter_scope: FilterScope,
}

impl Session {
    pub fn new(catalog: Catalog, identified: IdentifiedSet) -> Self {
        Self {
            catalog,
            identified,
            query: QueryState::default(),
            filter_scope: FilterScope::default(),
        }
    }

    /// Widen or narrow which fields the text filter searches
    pub fn with_filter_scope(mut self, scope: FilterScope) -> Self {
        self.filter_scope = scope;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn identified(&self) -> &IdentifiedSet {
        &self.identified
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Flip an item's identified state; persists immediately
    pub fn toggle_identification(&mut self, name: &str) -> bool {
        self.identified.toggle(name)
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.query.filter = text.into();
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.query.category = filter;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
    }

    pub fn search_by_price(&mut self, text: impl Into<String>, flags: MatchFlags) {
        self.query.price_input = text.into();
        self.query.price_flags = flags;
    }

    /// Clear all identification state (set and persisted file)
    pub fn reset(&mut self) {
        self.identified.reset();
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// The grouped, ordered, sorted catalog view
    pub fn catalog_view(&self) -> Vec<CategoryGroup<'_>> {
        let filtered = query::filter_items(
            self.catalog.items(),
            &self.query.filter,
            &self.query.category,
            self.filter_scope,
        );
        self.build_groups(filtered, true)
    }

    /// The price-search view for the current input and flags
    pub fn price_view(&self) -> PriceView<'_> {
        let target = match query::parse_price_query(&self.query.price_input) {
            PriceQuery::Empty => return PriceView::Idle,
            PriceQuery::Invalid => return PriceView::Invalid,
            PriceQuery::Target(target) => target,
        };

        let matches =
            query::match_by_price(self.catalog.items(), target, self.query.price_flags);
        if matches.is_empty() {
            return PriceView::NoMatch(target);
        }

        PriceView::Matches {
            target,
            groups: self.build_groups(matches, false),
        }
    }

    fn build_groups<'a>(&'a self, items: Vec<&'a Item>, sorted: bool) -> Vec<CategoryGroup<'a>> {
        let groups = query::group_by_category(&items);
        let ordered = query::order_groups(groups, self.catalog.category_order());

        ordered
            .into_iter()
            .map(|(category, mut members)| {
                if sorted {
                    query::sort_group(&mut members, self.query.sort, &self.identified);
                }
                CategoryGroup {
                    category,
                    items: members
                        .into_iter()
                        .map(|item| ItemRow {
                            identified: self.identified.has(&item.name),
                            item,
                        })
                        .collect(),
                }
            })
            .collect()
    }
}
