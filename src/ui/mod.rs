//! Terminal rendering.
//!
//! [`lines`] produces the renderer-agnostic display token stream from a
//! snapshot; [`view`] paints it with ratatui, along with the header, status
//! bar, and help overlay. [`theme`] holds the color scheme.

pub mod lines;
pub mod theme;
pub mod view;

pub use lines::{render_lines, LineToken, COUNT_COL_WIDTH, NAME_COL_WIDTH};
pub use theme::Theme;
