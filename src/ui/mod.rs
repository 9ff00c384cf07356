//! Terminal UI.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! - [`viewmodel`]: display-ready frame description
//! - [`renderer`]: entry point
//! - [`components`]: header, search bar, result list, status, detail pane, footer
//! - [`helpers`]: cursor positioning, highlighting, wrapping
//! - [`theme`]: palettes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DetailInfo, DisplayItem, FooterInfo, HeaderInfo, ResultsBody, SearchBarInfo, StatusMessage, UIViewModel,
};
