//! Catalog loader
//!
//! Loads the item catalog from a JSON document, with fallback to an
//! empty catalog so a bad data file never takes the app down.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::item::Item;

/// Fixed relative path of the catalog document
pub const CATALOG_PATH: &str = "assets/data/items.json";

/// Category display order used when the catalog document does not
/// supply its own.
const DEFAULT_CATEGORY_ORDER: &[&str] = &["草", "杖", "剣", "盾", "巻物", "指輪", "壺"];

/// Catalog load failure
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The two accepted document shapes: a bare array of items (legacy),
/// or an object that also carries the category display order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Legacy(Vec<Item>),
    WithConfig {
        #[serde(default)]
        category_order: Vec<String>,
        items: Vec<Item>,
    },
}

/// The immutable item catalog plus its display configuration
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    category_order: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            category_order: default_category_order(),
        }
    }
}

impl Catalog {
    /// Build a catalog directly from records, using the default
    /// category order. Mainly for tests.
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            items,
            category_order: default_category_order(),
        }
    }

    /// Load the catalog from a JSON document
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path.as_ref())?;
        let document: CatalogDocument = serde_json::from_str(&content)?;

        let catalog = match document {
            CatalogDocument::Legacy(items) => Self {
                items,
                category_order: default_category_order(),
            },
            CatalogDocument::WithConfig { category_order, items } => Self {
                items,
                category_order: if category_order.is_empty() {
                    default_category_order()
                } else {
                    category_order
                },
            },
        };

        log::info!(
            "Catalog loaded: {} items, {} ordered categories",
            catalog.items.len(),
            catalog.category_order.len()
        );
        Ok(catalog)
    }

    /// Startup entry point: any failure degrades to an empty catalog
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!("Failed to load catalog from {:?}: {}", path.as_ref(), e);
                Self::default()
            }
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Categories rendered first, in this order; anything else follows
    /// in encounter order.
    pub fn category_order(&self) -> &[String] {
        &self.category_order
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn default_category_order() -> Vec<String> {
    DEFAULT_CATEGORY_ORDER.iter().map(|s| s.to_string()).collect()
}
