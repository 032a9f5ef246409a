//! Glyphmark - rich-text markup to positioned, styled characters
//!
//! Glyphmark turns lightweight tagged text like `Hel<b>lo</b>` into one
//! positioned item per character and replays those items as draw calls:
//!
//! 1. Tokenize the markup into text, newline and tag tokens
//! 2. Interpret the tokens through a style stack, measuring every character
//! 3. Optionally wrap the visible text in quotation marks
//! 4. Align each line between two x bounds and stack the lines
//! 5. Render: strokes, then fills, then underline/strikethrough rules
//!
//! Measuring and drawing sit behind the [`Measurer`](traits::Measurer) and
//! [`Surface`](traits::Surface) traits, so the same layout runs against a
//! font file, a fixed-ratio test double or a host canvas.
//!
//! # Example
//!
//! ```
//! use glyphmark::prelude::*;
//! use glyphmark::measure_none::NoneMeasurer;
//!
//! let pipeline = Pipeline::builder().measurer(NoneMeasurer::new()).build()?;
//! let text = pipeline.layout(
//!     "Hel<b>lo</b>\nWorld",
//!     &TextStyle::with_font("serif", 24.0),
//!     &LayoutParams::boxed(Alignment::Center, 400.0),
//! )?;
//! assert_eq!(text.lines().len(), 2);
//! # Ok::<(), glyphmark::error::GlyphmarkError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `measure-none`: fixed-ratio measurer, no fonts needed (default)
//! - `measure-font`: font-file measurer backed by skrifa
//! - `render-json`: draw-call recording surface with JSON output (default)
//! - `render-svg`: SVG document surface (default)
//! - `full`: every backend

pub mod pipeline;
pub mod text;

pub use glyphmark_core::{
    error, metrics_config, traits, types, Color, FontDescriptor, MetricsConfig, MetricsProvider,
    MetricsStats, StyleId, StyleProps, TextStyle,
};
pub use glyphmark_layout::{align, bounds, quote, quote_with, render, LineMetrics, RenderStats};
pub use glyphmark_markup::{
    tokenize, CommandRegistry, InterpretOptions, Interpreter, StyleTransform, Token, BUILTINS,
};
pub use pipeline::{LayoutParams, Pipeline, PipelineBuilder};
pub use text::TextRenderer;

#[cfg(feature = "measure-none")]
pub use glyphmark_measure_none as measure_none;

#[cfg(feature = "measure-font")]
pub use glyphmark_measure_font as measure_font;

#[cfg(feature = "render-json")]
pub use glyphmark_render_json as render_json;

#[cfg(feature = "render-svg")]
pub use glyphmark_render_svg as render_svg;

/// Common imports for typical usage
pub mod prelude {
    pub use glyphmark_core::{
        error::{GlyphmarkError, MarkupError, Result},
        traits::{Measurer, Surface},
        types::{Alignment, Rect, RenderItem},
        Color, MetricsProvider, TextStyle,
    };
    pub use glyphmark_markup::CommandRegistry;

    pub use crate::{LayoutParams, Pipeline, TextRenderer};
}
