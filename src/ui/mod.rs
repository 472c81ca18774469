//! User interface
//!
//! Terminal UI using ratatui: two tabs over the session's derived
//! views, plus the reset and detail popups.

pub mod app;
pub mod render;

pub use app::{App, InputMode, Tab};
pub use render::draw;
