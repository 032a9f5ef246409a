//! SVG Surface: draw calls become a standalone SVG document
//!
//! Every stroked or filled character turns into its own `<text>` element
//! at the position layout gave it, so the document reproduces the layout
//! exactly in any viewer that has the named fonts. Rules become `<rect>`s.
//!
//! Positions from layout are line tops, so text is emitted with
//! `dominant-baseline="text-before-edge"`.

use std::fmt::Write as FmtWrite;

use glyphmark_core::error::{RenderError, Result};
use glyphmark_core::types::Rect;
use glyphmark_core::{Color, Surface, TextStyle};

/// Attribute strings for the style currently applied
#[derive(Debug, Clone, Default)]
struct StyleAttrs {
    font: String,
    fill: String,
    stroke: String,
}

/// SVG vector surface
#[derive(Debug, Default)]
pub struct SvgSurface {
    /// SVG canvas padding
    padding: f32,
    body: String,
    current: StyleAttrs,
    elements: usize,
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn paint(color: Color, alpha: f32) -> (String, f32) {
    let rgb = format!("rgb({},{},{})", color.r, color.g, color.b);
    (rgb, color.a as f32 / 255.0 * alpha)
}

impl SvgSurface {
    /// Create a new SVG surface with default padding
    pub fn new() -> Self {
        Self {
            padding: 10.0,
            ..Self::default()
        }
    }

    /// Set the padding around the SVG canvas
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Number of elements drawn so far
    pub fn element_count(&self) -> usize {
        self.elements
    }

    fn text_element(&mut self, ch: char, x: f32, y: f32, paint: &str) {
        let text = escape(&ch.to_string());
        let _ = writeln!(
            &mut self.body,
            r#"  <text x="{:.2}" y="{:.2}" {} {} dominant-baseline="text-before-edge" xml:space="preserve">{}</text>"#,
            x, y, self.current.font, paint, text
        );
        self.elements += 1;
    }

    /// Wrap everything drawn so far in a document of the given content size
    pub fn finish(&self, width: f32, height: f32) -> Result<String> {
        self.finish_area(Rect {
            x: 0.0,
            y: 0.0,
            width,
            height,
        })
    }

    /// Wrap everything drawn so far in a document showing `area`
    ///
    /// `area` may start left of or above the origin; the content is
    /// shifted so the whole area lands inside the canvas.
    pub fn finish_area(&self, area: Rect) -> Result<String> {
        let Rect {
            x,
            y,
            width,
            height,
        } = area;
        if ![x, y, width, height].iter().all(|v| v.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(RenderError::InvalidDimensions { width, height }.into());
        }

        let full_width = width + self.padding * 2.0;
        let full_height = height + self.padding * 2.0;
        let mut svg = String::new();

        writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)
            .map_err(|e| RenderError::EncodingFailed(e.to_string()))?;
        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.2} {:.2}" width="{:.0}" height="{:.0}">"#,
            full_width, full_height, full_width, full_height
        )
        .map_err(|e| RenderError::EncodingFailed(e.to_string()))?;
        writeln!(
            &mut svg,
            r#"<g transform="translate({:.2},{:.2})">"#,
            self.padding - x,
            self.padding - y
        )
        .map_err(|e| RenderError::EncodingFailed(e.to_string()))?;
        svg.push_str(&self.body);
        writeln!(&mut svg, "</g>\n</svg>").map_err(|e| RenderError::EncodingFailed(e.to_string()))?;

        log::debug!("SvgSurface: {} elements, {}x{}", self.elements, full_width, full_height);
        Ok(svg)
    }
}

impl Surface for SvgSurface {
    fn name(&self) -> &'static str {
        "SVG"
    }

    fn apply_style(&mut self, style: &TextStyle) {
        let mut font = format!(
            r#"font-family="{}" font-size="{}""#,
            escape(&style.font_family),
            style.font_size
        );
        if style.bold {
            font.push_str(r#" font-weight="bold""#);
        }
        if style.italic {
            font.push_str(r#" font-style="italic""#);
        }

        let (fill, fill_opacity) = paint(style.fill, style.alpha);
        let stroke = match style.stroke_color.filter(|_| style.has_stroke()) {
            Some(color) => {
                let (stroke, stroke_opacity) = paint(color, style.alpha);
                format!(
                    r#"fill="none" stroke="{}" stroke-opacity="{:.2}" stroke-width="{}" stroke-linejoin="round""#,
                    stroke, stroke_opacity, style.stroke_width
                )
            },
            None => String::new(),
        };

        self.current = StyleAttrs {
            font,
            fill: format!(r#"fill="{}" fill-opacity="{:.2}""#, fill, fill_opacity),
            stroke,
        };
    }

    fn stroke_char(&mut self, ch: char, x: f32, y: f32) {
        if self.current.stroke.is_empty() || ch.is_whitespace() {
            return;
        }
        let paint = self.current.stroke.clone();
        self.text_element(ch, x, y, &paint);
    }

    fn fill_char(&mut self, ch: char, x: f32, y: f32) {
        if ch.is_whitespace() {
            return;
        }
        let paint = self.current.fill.clone();
        self.text_element(ch, x, y, &paint);
    }

    fn fill_rule(&mut self, x: f32, y: f32, width: f32, thickness: f32) {
        let _ = writeln!(
            &mut self.body,
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" {}/>"#,
            x, y, width, thickness, self.current.fill
        );
        self.elements += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphmark_core::types::RenderItem;
    use std::sync::Arc;

    fn line(text: &str, style: &Arc<TextStyle>) -> Vec<RenderItem> {
        text.chars()
            .enumerate()
            .map(|(i, ch)| {
                let mut item = RenderItem::character(ch, 10.0, 20.0, style.clone());
                item.set_position(i as f32 * 10.0, 5.0);
                item
            })
            .collect()
    }

    #[test]
    fn test_document_structure() {
        let style = Arc::new(TextStyle::with_font("serif", 16.0));
        let mut surface = SvgSurface::new();
        glyphmark_layout::render(&line("Hi", &style), &mut surface);

        let svg = surface.finish(20.0, 20.0).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 40.00 40.00""#));
        assert!(svg.contains(r#"<g transform="translate(10.00,10.00)">"#));
        assert!(svg.contains(r#"font-family="serif" font-size="16""#));
        assert!(svg.contains(r#"x="10.00" y="5.00""#));
        assert!(svg.contains(">H</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(surface.element_count(), 2);
    }

    #[test]
    fn test_markup_characters_are_escaped() {
        let style = Arc::new(TextStyle::default().derive(|p| p.font_family = "A&B".into()));
        let mut surface = SvgSurface::new();
        glyphmark_layout::render(&line("<&>", &style), &mut surface);

        let svg = surface.finish(30.0, 20.0).unwrap();
        assert!(svg.contains(">&lt;</text>"));
        assert!(svg.contains(">&amp;</text>"));
        assert!(svg.contains(">&gt;</text>"));
        assert!(svg.contains(r#"font-family="A&amp;B""#));
    }

    #[test]
    fn test_stroke_fill_and_opacity() {
        let style = Arc::new(TextStyle::default().derive(|p| {
            p.fill = Color::rgb(255, 0, 0);
            p.stroke_width = 2.0;
            p.stroke_color = Some(Color::rgb(0, 0, 255));
            p.alpha = 0.5;
            p.bold = true;
        }));
        let mut surface = SvgSurface::new().with_padding(0.0);
        glyphmark_layout::render(&line("a", &style), &mut surface);

        let svg = surface.finish(10.0, 20.0).unwrap();
        assert!(svg.contains(r#"stroke="rgb(0,0,255)" stroke-opacity="0.50" stroke-width="2""#));
        assert!(svg.contains(r#"fill="rgb(255,0,0)" fill-opacity="0.50""#));
        assert!(svg.contains(r#"font-weight="bold""#));
        assert_eq!(surface.element_count(), 2);
        // Stroke is drawn under the fill
        let stroke_at = svg.find("stroke=").unwrap();
        let fill_at = svg.find("fill=\"rgb(255,0,0)\"").unwrap();
        assert!(stroke_at < fill_at);
    }

    #[test]
    fn test_spaces_and_rules() {
        let style = Arc::new(TextStyle::default().derive(|p| p.underline = true));
        let mut surface = SvgSurface::new();
        glyphmark_layout::render(&line("a b", &style), &mut surface);

        let svg = surface.finish(30.0, 20.0).unwrap();
        assert_eq!(svg.matches("<text").count(), 2);
        assert_eq!(svg.matches("<rect").count(), 3);
    }

    #[test]
    fn test_stroked_spaces_emit_nothing() {
        let style = Arc::new(TextStyle::default().derive(|p| {
            p.stroke_width = 1.0;
            p.stroke_color = Some(Color::white());
        }));
        let mut surface = SvgSurface::new();
        glyphmark_layout::render(&line("a b", &style), &mut surface);

        let svg = surface.finish(30.0, 20.0).unwrap();
        assert_eq!(svg.matches("<text").count(), 4);
        assert!(!svg.contains("> </text>"));
    }

    #[test]
    fn test_area_left_of_origin_is_shifted_into_view() {
        let style = Arc::new(TextStyle::default());
        let mut surface = SvgSurface::new().with_padding(5.0);
        glyphmark_layout::render(&line("ab", &style), &mut surface);

        let svg = surface
            .finish_area(Rect {
                x: -50.0,
                y: 0.0,
                width: 100.0,
                height: 25.0,
            })
            .unwrap();
        assert!(svg.contains(r#"viewBox="0 0 110.00 35.00""#));
        assert!(svg.contains(r#"<g transform="translate(55.00,5.00)">"#));
    }

    #[test]
    fn test_invalid_dimensions() {
        let surface = SvgSurface::new();
        assert!(surface.finish(-1.0, 10.0).is_err());
        assert!(surface.finish(f32::NAN, 10.0).is_err());
        assert!(surface.finish(0.0, 0.0).is_ok());
        let bad_origin = Rect {
            x: f32::INFINITY,
            ..Rect::default()
        };
        assert!(surface.finish_area(bad_origin).is_err());
    }
}
