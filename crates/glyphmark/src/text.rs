//! A laid-out block of rich text that can be re-aligned and drawn

use glyphmark_core::types::{Alignment, Rect, RenderItem};
use glyphmark_core::{MetricsProvider, Result, Surface, TextStyle};
use glyphmark_layout::{LineMetrics, RenderStats};
use glyphmark_markup::Interpreter;

/// Owns the render items of one piece of markup
///
/// ```
/// use glyphmark::prelude::*;
/// use glyphmark::measure_none::NoneMeasurer;
///
/// let mut metrics = MetricsProvider::new(NoneMeasurer::new());
/// let mut text = TextRenderer::parse("Hel<b>lo</b>", &TextStyle::default(), &mut metrics)?;
/// text.align(Alignment::Center, 0.0, 200.0, 0.0);
/// assert_eq!(text.lines().len(), 1);
/// # Ok::<(), glyphmark::error::GlyphmarkError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    items: Vec<RenderItem>,
    lines: Vec<LineMetrics>,
}

impl TextRenderer {
    /// Interpret `markup` with the built-in commands
    pub fn parse(markup: &str, base: &TextStyle, metrics: &mut MetricsProvider) -> Result<Self> {
        Self::parse_with(&Interpreter::default(), markup, base, metrics)
    }

    /// Interpret `markup` with a configured interpreter
    pub fn parse_with(
        interpreter: &Interpreter<'_>,
        markup: &str,
        base: &TextStyle,
        metrics: &mut MetricsProvider,
    ) -> Result<Self> {
        let items = interpreter.parse(markup, base, metrics)?;
        Ok(Self::from_items(items))
    }

    /// Wrap items produced elsewhere
    pub fn from_items(items: Vec<RenderItem>) -> Self {
        Self {
            items,
            lines: Vec::new(),
        }
    }

    /// Surround the visible text with straight double quotes
    ///
    /// Call before [`TextRenderer::align`]; quoting drops earlier line metrics.
    pub fn quote(&mut self, metrics: &mut MetricsProvider) -> &mut Self {
        glyphmark_layout::quote(&mut self.items, metrics);
        self.lines.clear();
        self
    }

    /// Surround the visible text with the given marks
    pub fn quote_with(&mut self, open: char, close: char, metrics: &mut MetricsProvider) -> &mut Self {
        glyphmark_layout::quote_with(&mut self.items, open, close, metrics);
        self.lines.clear();
        self
    }

    /// Position every item; may be called again with other parameters
    pub fn align(&mut self, mode: Alignment, x_start: f32, x_end: f32, y_start: f32) -> &[LineMetrics] {
        self.lines = glyphmark_layout::align(&mut self.items, mode, x_start, x_end, y_start);
        &self.lines
    }

    /// Issue draw calls for the positioned items
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> RenderStats {
        glyphmark_layout::render(&self.items, surface)
    }

    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<RenderItem> {
        self.items
    }

    /// Lines from the last alignment, empty before the first one
    pub fn lines(&self) -> &[LineMetrics] {
        &self.lines
    }

    pub fn bounds(&self) -> Option<Rect> {
        glyphmark_layout::bounds(&self.items)
    }

    /// Number of drawable characters
    pub fn char_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_newline()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphmark_core::MetricsConfig;
    use glyphmark_measure_none::NoneMeasurer;

    fn metrics() -> MetricsProvider {
        MetricsProvider::with_config(NoneMeasurer::new(), MetricsConfig::default())
    }

    #[test]
    fn test_parse_quote_align() {
        let mut metrics = metrics();
        let base = TextStyle::with_font("sans-serif", 20.0);
        let mut text = TextRenderer::parse(" hi ", &base, &mut metrics).unwrap();
        assert_eq!(text.char_count(), 4);

        text.quote(&mut metrics);
        assert_eq!(text.char_count(), 6);

        let lines = text.align(Alignment::Right, 0.0, 100.0, 0.0).to_vec();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].width, 60.0);
        assert_eq!(text.items()[0].x(), 40.0);
        assert_eq!(text.bounds().unwrap().right(), 100.0);
    }

    #[test]
    fn test_quoting_invalidates_lines() {
        let mut metrics = metrics();
        let mut text = TextRenderer::parse("a", &TextStyle::default(), &mut metrics).unwrap();
        text.align(Alignment::Left, 0.0, 10.0, 0.0);
        assert!(!text.lines().is_empty());
        text.quote_with('«', '»', &mut metrics);
        assert!(text.lines().is_empty());
    }

    #[test]
    fn test_markup_errors_surface_as_glyphmark_errors() {
        let err = TextRenderer::parse("<b>", &TextStyle::default(), &mut metrics()).unwrap_err();
        assert!(matches!(err, glyphmark_core::GlyphmarkError::Markup(_)));
    }

    #[test]
    fn test_empty_markup() {
        let mut text = TextRenderer::parse("", &TextStyle::default(), &mut metrics()).unwrap();
        assert!(text.is_empty());
        assert_eq!(text.align(Alignment::Center, 0.0, 10.0, 0.0).len(), 1);
        assert!(text.bounds().is_none());
    }
}
