//! None Measurer - metrics without fonts
//!
//! Every character advances by a fixed fraction of the font size and every
//! line is a fixed multiple of it. No font data, no platform calls, fully
//! deterministic: what tests and headless previews need.

use glyphmark_core::{FontDescriptor, Measurer};

/// Advance as a fraction of the font size
pub const DEFAULT_ADVANCE_RATIO: f32 = 0.5;

/// Line height as a multiple of the font size
pub const DEFAULT_LINE_HEIGHT_RATIO: f32 = 1.25;

/// Extra advance for bold text
pub const BOLD_WIDENING: f32 = 1.1;

/// A measurer that only looks at the font size
#[derive(Debug, Clone)]
pub struct NoneMeasurer {
    advance_ratio: f32,
    line_height_ratio: f32,
    advance: f32,
}

impl NoneMeasurer {
    /// Create a measurer with the default ratios
    pub fn new() -> Self {
        Self {
            advance_ratio: DEFAULT_ADVANCE_RATIO,
            line_height_ratio: DEFAULT_LINE_HEIGHT_RATIO,
            advance: 0.0,
        }
    }

    pub fn with_advance_ratio(mut self, ratio: f32) -> Self {
        self.advance_ratio = ratio;
        self
    }

    pub fn with_line_height_ratio(mut self, ratio: f32) -> Self {
        self.line_height_ratio = ratio;
        self
    }
}

impl Default for NoneMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl Measurer for NoneMeasurer {
    fn name(&self) -> &'static str {
        "none"
    }

    fn configure(&mut self, font: &FontDescriptor) {
        let widening = if font.bold { BOLD_WIDENING } else { 1.0 };
        self.advance = font.size * self.advance_ratio * widening;
        log::trace!("NoneMeasurer: {} -> advance {}", font, self.advance);
    }

    fn measure_char(&mut self, ch: char) -> f32 {
        if ch.is_control() {
            0.0
        } else {
            self.advance
        }
    }

    fn line_height(&mut self, size: f32, _family: &str) -> f32 {
        size * self.line_height_ratio
    }
}
