//! The contracts between the pipeline and its host
//!
//! Glyphmark never talks to a platform directly. Measuring text and
//! drawing it both go through these traits, so a canvas, a font file or
//! a test double can stand behind the same layout code.
//!
//! - [`Measurer`] - configures a font and measures characters and lines
//! - [`Surface`] - applies styles and strokes/fills single characters

use crate::style::{FontDescriptor, TextStyle};

/// A measurement context that can be pointed at one font at a time
///
/// ```ignore
/// struct FixedMeasurer { size: f32 }
///
/// impl Measurer for FixedMeasurer {
///     fn name(&self) -> &'static str { "fixed" }
///     fn configure(&mut self, font: &FontDescriptor) { self.size = font.size; }
///     fn measure_char(&mut self, _ch: char) -> f32 { self.size * 0.5 }
///     fn line_height(&mut self, size: f32, _family: &str) -> f32 { size }
/// }
/// ```
pub trait Measurer: Send {
    /// Used for debugging and logging
    fn name(&self) -> &'static str;

    /// Point the context at a font; may be expensive
    fn configure(&mut self, font: &FontDescriptor);

    /// Advance width of one character under the current configuration
    fn measure_char(&mut self, ch: char) -> f32;

    /// Height of a line of representative glyphs at `size` in `family`
    ///
    /// Must not disturb the configuration used by [`Measurer::measure_char`].
    fn line_height(&mut self, size: f32, family: &str) -> f32;
}

/// Something characters can be drawn onto
pub trait Surface {
    /// Your surface's signature
    fn name(&self) -> &'static str;

    /// Set fill color, stroke color and width, alpha and font for what follows
    fn apply_style(&mut self, style: &TextStyle);

    /// Outline one character with the applied stroke
    fn stroke_char(&mut self, ch: char, x: f32, y: f32);

    /// Fill one character with the applied fill color
    fn fill_char(&mut self, ch: char, x: f32, y: f32);

    /// Fill a horizontal rule, used for underline and strikethrough
    fn fill_rule(&mut self, _x: f32, _y: f32, _width: f32, _thickness: f32) {}
}

impl<M: Measurer + ?Sized> Measurer for Box<M> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn configure(&mut self, font: &FontDescriptor) {
        (**self).configure(font)
    }

    fn measure_char(&mut self, ch: char) -> f32 {
        (**self).measure_char(ch)
    }

    fn line_height(&mut self, size: f32, family: &str) -> f32 {
        (**self).line_height(size, family)
    }
}
