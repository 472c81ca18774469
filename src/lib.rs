//! Zukan - terminal item identification checker
//!
//! A reference tool for mystery dungeon roguelikes: track which items
//! you have identified this run, and look unknown items up by their
//! shop price.

pub mod catalog;
pub mod query;
pub mod save;
pub mod session;
pub mod ui;

// Re-export commonly used types
pub use catalog::{Catalog, Item, MatchFlags};
pub use save::IdentifiedSet;
pub use session::Session;
