//! Draw positioned items onto a [`Surface`]
//!
//! Three passes, in this order so fills sit on top of strokes and rules
//! on top of both:
//!
//! 1. stroke every character whose style has a stroke
//! 2. fill every character
//! 3. underline and strike through characters that ask for it
//!
//! Newline items draw nothing. Styles are applied lazily: the surface
//! only hears about a style when its identity differs from the one it
//! was last given, across all passes.

use glyphmark_core::types::{CharItem, RenderItem};
use glyphmark_core::{StyleId, Surface};

/// Where rules sit relative to the line top, as fractions of the font size
const UNDERLINE_OFFSET: f32 = 0.9;
const STRIKETHROUGH_OFFSET: f32 = 0.55;
const RULE_THICKNESS: f32 = 1.0 / 16.0;

/// What a render call sent to the surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub style_changes: usize,
    pub strokes: usize,
    pub fills: usize,
    pub rules: usize,
}

struct StyleTracker {
    applied: Option<StyleId>,
    changes: usize,
}

impl StyleTracker {
    fn apply<S: Surface + ?Sized>(&mut self, surface: &mut S, item: &CharItem) {
        let id = item.style.id();
        if self.applied != Some(id) {
            surface.apply_style(&item.style);
            self.applied = Some(id);
            self.changes += 1;
        }
    }
}

/// Issue the draw calls for `items` in stroke, fill, rule order
pub fn render<S: Surface + ?Sized>(items: &[RenderItem], surface: &mut S) -> RenderStats {
    let mut tracker = StyleTracker {
        applied: None,
        changes: 0,
    };
    let mut stats = RenderStats::default();
    let chars = || items.iter().filter_map(RenderItem::as_char);

    for item in chars().filter(|c| c.style.has_stroke()) {
        tracker.apply(surface, item);
        surface.stroke_char(item.character, item.x, item.y);
        stats.strokes += 1;
    }

    for item in chars() {
        tracker.apply(surface, item);
        surface.fill_char(item.character, item.x, item.y);
        stats.fills += 1;
    }

    for item in chars().filter(|c| c.style.underline || c.style.strikethrough) {
        tracker.apply(surface, item);
        let size = item.style.font_size;
        let thickness = (size * RULE_THICKNESS).max(1.0);
        if item.style.underline {
            surface.fill_rule(item.x, item.y + size * UNDERLINE_OFFSET, item.width, thickness);
            stats.rules += 1;
        }
        if item.style.strikethrough {
            surface.fill_rule(item.x, item.y + size * STRIKETHROUGH_OFFSET, item.width, thickness);
            stats.rules += 1;
        }
    }

    stats.style_changes = tracker.changes;
    log::debug!(
        "render on {}: {} style changes, {} strokes, {} fills, {} rules",
        surface.name(),
        stats.style_changes,
        stats.strokes,
        stats.fills,
        stats.rules
    );
    stats
}
