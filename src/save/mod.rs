//! Persistence
//!
//! Durable identification state, stored in the platform data directory.

pub mod identified;

pub use identified::{default_path, IdentifiedSet, STORAGE_KEY};
