//! Text styles and the identity that makes them cheap to compare
//!
//! A [`TextStyle`] is an immutable bundle of [`StyleProps`] plus a
//! [`StyleId`]. Two styles with the same properties are equal, but the
//! pipeline compares styles by id when deciding whether a measurement
//! context or a drawing surface needs to be reconfigured. Every derived
//! style receives a fresh id, even when none of its properties changed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ArgumentError;

static NEXT_STYLE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one style instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(u64);

impl StyleId {
    fn next() -> Self {
        Self(NEXT_STYLE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Simple RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Self::black(),
            "white" => Self::white(),
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "lime" => Self::rgb(0, 255, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "cyan" | "aqua" => Self::rgb(0, 255, 255),
            "magenta" | "fuchsia" => Self::rgb(255, 0, 255),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(128, 0, 128),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "transparent" => Self::rgba(0, 0, 0, 0),
            _ => return None,
        };
        Some(color)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ArgumentError;

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` (the `#` is optional) or a CSS name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(color) = Self::named(&trimmed.to_ascii_lowercase()) {
            return Ok(color);
        }

        let hex = trimmed.trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ArgumentError::new(format!("not a color: {s:?}")));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ArgumentError::new(format!("not a color: {s:?}")))
        };

        match hex.len() {
            3 => {
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            },
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(ArgumentError::new(format!(
                "color must be #rgb, #rrggbb or #rrggbbaa, got {s:?}"
            ))),
        }
    }
}

/// The font a measurement context must be configured with
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl FontDescriptor {
    /// Key for line-height lookups: size and family only
    ///
    /// Bold and italic never change the line height, so they stay out of
    /// the key and styles differing only in weight share one measurement.
    pub fn height_key(&self) -> String {
        format!("{}px {}", self.size, self.family)
    }
}

impl fmt::Display for FontDescriptor {
    /// CSS `font` shorthand, e.g. `italic bold 16px serif`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.italic {
            f.write_str("italic ")?;
        }
        if self.bold {
            f.write_str("bold ")?;
        }
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// Every property a style controls
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProps {
    pub font_family: String,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub fill: Color,
    pub stroke_width: f32,
    /// `None` means no stroke color, which disables stroking
    pub stroke_color: Option<Color>,
    pub letter_spacing: f32,
    /// Multiplier applied to the measured line height
    pub line_spacing: f32,
    /// Opacity in `0.0..=1.0`; `0.0` is fully transparent, not "unset"
    pub alpha: f32,
}

impl Default for StyleProps {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 16.0,
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            fill: Color::black(),
            stroke_width: 0.0,
            stroke_color: None,
            letter_spacing: 0.0,
            line_spacing: 1.0,
            alpha: 1.0,
        }
    }
}

/// An immutable text style with a process-unique identity
///
/// Properties are read through `Deref` (`style.bold`, `style.font_size`).
/// New styles come from [`TextStyle::new`] or [`TextStyle::derive`]; both
/// hand out a fresh [`StyleId`]. Cloning keeps the id, since a clone is
/// the same logical instance.
#[derive(Debug, Clone)]
pub struct TextStyle {
    id: StyleId,
    props: StyleProps,
}

impl TextStyle {
    pub fn new(props: StyleProps) -> Self {
        Self {
            id: StyleId::next(),
            props,
        }
    }

    /// Base style with the given family and size, defaults elsewhere
    pub fn with_font(family: impl Into<String>, size: f32) -> Self {
        Self::new(StyleProps {
            font_family: family.into(),
            font_size: size,
            ..StyleProps::default()
        })
    }

    pub fn id(&self) -> StyleId {
        self.id
    }

    pub fn props(&self) -> &StyleProps {
        &self.props
    }

    /// Copy the properties, let `edit` change them, and mint a new style
    ///
    /// The result never shares an id with `self`, even if `edit` is a no-op.
    pub fn derive(&self, edit: impl FnOnce(&mut StyleProps)) -> Self {
        let mut props = self.props.clone();
        edit(&mut props);
        Self::new(props)
    }

    /// Identity comparison, as opposed to `==` which compares properties
    pub fn same_instance(&self, other: &TextStyle) -> bool {
        self.id == other.id
    }

    pub fn font(&self) -> FontDescriptor {
        FontDescriptor {
            family: self.props.font_family.clone(),
            size: self.props.font_size,
            bold: self.props.bold,
            italic: self.props.italic,
        }
    }

    pub fn has_stroke(&self) -> bool {
        self.props.stroke_width > 0.0 && self.props.stroke_color.is_some()
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(StyleProps::default())
    }
}

impl Deref for TextStyle {
    type Target = StyleProps;

    fn deref(&self) -> &StyleProps {
        &self.props
    }
}

impl PartialEq for TextStyle {
    fn eq(&self, other: &Self) -> bool {
        self.props == other.props
    }
}
