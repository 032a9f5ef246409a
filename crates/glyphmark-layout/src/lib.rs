//! Glyphmark layout: from render items to draw calls
//!
//! - [`align`] places interpreted items on lines between two x bounds
//! - [`quote`] wraps the visible text in quotation marks before alignment
//! - [`render`] replays positioned items onto a [`glyphmark_core::Surface`]

pub mod align;
pub mod quote;
pub mod render;

pub use align::{align, bounds, line_heights, LineMetrics};
pub use quote::{quote, quote_with};
pub use render::{render, RenderStats};
