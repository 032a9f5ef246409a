//! Glyphmark Core: the shared vocabulary of the rich-text pipeline
//!
//! Markup goes in, positioned characters come out. Every stage in between
//! speaks the types defined here.
//!
//! ## The Pipeline
//!
//! 1. **Tokenizing** - Markup becomes text runs, newlines and command tags
//! 2. **Interpreting** - A style stack turns tokens into [`types::RenderItem`]s
//! 3. **Quoting** (optional) - Quotation marks wrap the visible text
//! 4. **Aligning** - Lines get their final x/y coordinates
//! 5. **Rendering** - Characters are stroked and filled on a [`Surface`]
//!
//! This crate holds the pieces every stage needs: [`TextStyle`] with its
//! identity, the [`Measurer`] and [`Surface`] contracts a host implements,
//! the caching [`MetricsProvider`], and the error taxonomy.

pub mod cache;
pub mod error;
pub mod metrics;
pub mod metrics_config;
pub mod style;
pub mod traits;

pub use error::{GlyphmarkError, MarkupError, Result};
pub use metrics::{MetricsProvider, MetricsStats};
pub use metrics_config::MetricsConfig;
pub use style::{Color, FontDescriptor, StyleId, StyleProps, TextStyle};
pub use traits::{Measurer, Surface};

/// The data structures that flow between stages
pub mod types {
    use crate::style::TextStyle;
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::sync::Arc;

    /// One drawable character and where it goes
    #[derive(Debug, Clone)]
    pub struct CharItem {
        pub character: char,
        pub x: f32,
        pub y: f32,
        /// Measured advance of the glyph
        pub advance: f32,
        /// Layout box: the advance plus letter spacing attributed by alignment
        pub width: f32,
        pub height: f32,
        pub style: Arc<TextStyle>,
    }

    /// A forced line break; occupies no width
    #[derive(Debug, Clone, PartialEq)]
    pub struct NewlineItem {
        pub x: f32,
        pub y: f32,
        pub height: f32,
    }

    /// A character or a line-break sentinel
    #[derive(Debug, Clone)]
    pub enum RenderItem {
        Character(CharItem),
        Newline(NewlineItem),
    }

    impl RenderItem {
        /// An unpositioned character whose box is its advance
        pub fn character(character: char, advance: f32, height: f32, style: Arc<TextStyle>) -> Self {
            Self::Character(CharItem {
                character,
                x: 0.0,
                y: 0.0,
                advance,
                width: advance,
                height,
                style,
            })
        }

        /// An unpositioned line break
        pub fn newline(height: f32) -> Self {
            Self::Newline(NewlineItem {
                x: 0.0,
                y: 0.0,
                height,
            })
        }

        pub fn is_newline(&self) -> bool {
            matches!(self, Self::Newline(_))
        }

        pub fn as_char(&self) -> Option<&CharItem> {
            match self {
                Self::Character(item) => Some(item),
                Self::Newline(_) => None,
            }
        }

        pub fn x(&self) -> f32 {
            match self {
                Self::Character(item) => item.x,
                Self::Newline(item) => item.x,
            }
        }

        pub fn y(&self) -> f32 {
            match self {
                Self::Character(item) => item.y,
                Self::Newline(item) => item.y,
            }
        }

        pub fn width(&self) -> f32 {
            match self {
                Self::Character(item) => item.width,
                Self::Newline(_) => 0.0,
            }
        }

        pub fn height(&self) -> f32 {
            match self {
                Self::Character(item) => item.height,
                Self::Newline(item) => item.height,
            }
        }

        pub fn set_position(&mut self, x: f32, y: f32) {
            match self {
                Self::Character(item) => {
                    item.x = x;
                    item.y = y;
                },
                Self::Newline(item) => {
                    item.x = x;
                    item.y = y;
                },
            }
        }
    }

    /// Where each line sits between `x_start` and `x_end`
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Alignment {
        #[default]
        Left,
        Center,
        Right,
    }

    impl Alignment {
        pub fn as_str(&self) -> &'static str {
            match self {
                Self::Left => "left",
                Self::Center => "center",
                Self::Right => "right",
            }
        }
    }

    impl fmt::Display for Alignment {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// Axis-aligned box in layout coordinates
    #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
    pub struct Rect {
        pub x: f32,
        pub y: f32,
        pub width: f32,
        pub height: f32,
    }

    impl Rect {
        pub fn right(&self) -> f32 {
            self.x + self.width
        }

        pub fn bottom(&self) -> f32 {
            self.y + self.height
        }

        /// Smallest rect covering both
        pub fn union(&self, other: &Rect) -> Rect {
            let x = self.x.min(other.x);
            let y = self.y.min(other.y);
            Rect {
                x,
                y,
                width: self.right().max(other.right()) - x,
                height: self.bottom().max(other.bottom()) - y,
            }
        }
    }

}
