//! Alignment pass: final coordinates for every render item
//!
//! Two passes over the same buffer. The first collects one height per
//! line (the tallest item since the previous newline, the newline itself
//! included, plus the trailing line). The second walks the items again,
//! accumulates line widths, and places each finished line according to
//! the [`Alignment`].
//!
//! Letter spacing belongs to the character it follows: when character
//! N+1 is reached, N's spacing is added to N's box and to the line width.
//! The last character on a line therefore carries no spacing.

use glyphmark_core::types::{Alignment, Rect, RenderItem};

/// Where one laid-out line ended up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// x of the first item on the line
    pub x: f32,
    /// Top of the line
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Height of every line: one per newline plus the trailing line
pub fn line_heights(items: &[RenderItem]) -> Vec<f32> {
    let mut heights = Vec::new();
    let mut current: f32 = 0.0;

    for item in items {
        current = current.max(item.height());
        if item.is_newline() {
            heights.push(current);
            current = 0.0;
        }
    }
    heights.push(current);
    heights
}

/// Assign x/y to every item, line by line
///
/// Lines are placed between `x_start` and `x_end` and stacked downwards
/// from `y_start`. Every item on a line gets the line's top as its y; a
/// newline item sits right after the last character of its line.
/// Running the pass again on the same items gives the same result.
pub fn align(
    items: &mut [RenderItem],
    mode: Alignment,
    x_start: f32,
    x_end: f32,
    y_start: f32,
) -> Vec<LineMetrics> {
    let heights = line_heights(items);
    let mut lines = Vec::with_capacity(heights.len());

    let mut y = y_start;
    let mut line_start = 0;
    let mut line_width = 0.0;
    let mut previous_char: Option<usize> = None;

    for index in 0..items.len() {
        if items[index].is_newline() {
            let height = heights[lines.len()];
            let placement = LinePlacement {
                mode,
                x_start,
                x_end,
                y,
                width: line_width,
                height,
            };
            lines.push(placement.place(&mut items[line_start..=index]));

            y += height;
            line_start = index + 1;
            line_width = 0.0;
            previous_char = None;
            continue;
        }

        if let Some(previous) = previous_char {
            if let RenderItem::Character(prev) = &mut items[previous] {
                let spacing = prev.style.letter_spacing;
                prev.width += spacing;
                line_width += spacing;
            }
        }

        if let RenderItem::Character(item) = &mut items[index] {
            item.width = item.advance;
            line_width += item.width;
        }
        previous_char = Some(index);
    }

    let placement = LinePlacement {
        mode,
        x_start,
        x_end,
        y,
        width: line_width,
        height: heights[lines.len()],
    };
    lines.push(placement.place(&mut items[line_start..]));

    log::debug!(
        "align: {} items in {} lines, {} alignment",
        items.len(),
        lines.len(),
        mode
    );
    lines
}

struct LinePlacement {
    mode: Alignment,
    x_start: f32,
    x_end: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl LinePlacement {
    fn start_x(&self) -> f32 {
        match self.mode {
            Alignment::Left => self.x_start,
            Alignment::Center => self.x_start + (self.x_end - self.x_start) / 2.0 - self.width / 2.0,
            Alignment::Right => self.x_end - self.width,
        }
    }

    fn place(&self, line: &mut [RenderItem]) -> LineMetrics {
        let x = self.start_x();
        let mut cursor = x;
        for item in line {
            item.set_position(cursor, self.y);
            cursor += item.width();
        }
        LineMetrics {
            x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Smallest box containing every positioned item
pub fn bounds(items: &[RenderItem]) -> Option<Rect> {
    let mut iter = items.iter();
    let first = iter.next()?;
    let (mut left, mut top) = (first.x(), first.y());
    let (mut right, mut bottom) = (first.x() + first.width(), first.y() + first.height());

    for item in iter {
        left = left.min(item.x());
        top = top.min(item.y());
        right = right.max(item.x() + item.width());
        bottom = bottom.max(item.y() + item.height());
    }

    Some(Rect {
        x: left,
        y: top,
        width: right - left,
        height: bottom - top,
    })
}
