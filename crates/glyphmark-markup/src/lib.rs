//! Glyphmark markup: from tagged text to styled characters
//!
//! Two stages of the pipeline live here:
//!
//! 1. [`tokenize`] splits markup like `Hel<b>lo</b>` into [`Token`]s
//! 2. [`Interpreter`] runs the tokens through a style stack, asking the
//!    [`CommandRegistry`] how each tag changes the style and the
//!    [`glyphmark_core::MetricsProvider`] how wide each character is
//!
//! ```
//! use glyphmark_core::{MetricsProvider, TextStyle};
//! use glyphmark_measure_none::NoneMeasurer;
//!
//! let mut metrics = MetricsProvider::new(NoneMeasurer::new());
//! let items = glyphmark_markup::parse("Hel<b>lo</b>", &TextStyle::default(), &mut metrics)?;
//! assert_eq!(items.len(), 5);
//! # Ok::<(), glyphmark_core::MarkupError>(())
//! ```

pub mod commands;
pub mod interpreter;
pub mod tokenizer;

pub use commands::{Builtin, CommandRegistry, StyleTransform, BUILTINS};
pub use interpreter::{interpret, parse, InterpretOptions, Interpreter};
pub use tokenizer::{tokenize, Token};
