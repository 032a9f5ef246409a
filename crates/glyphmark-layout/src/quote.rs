//! Wrap the visible span of an item sequence in quotation marks
//!
//! Runs before alignment. The marks are ordinary character items: they
//! borrow style and height from the character they sit next to and get a
//! width measured in that style.

use glyphmark_core::types::RenderItem;
use glyphmark_core::MetricsProvider;

/// Quote with straight double quotes on both ends
pub fn quote(items: &mut Vec<RenderItem>, metrics: &mut MetricsProvider) {
    quote_with(items, '"', '"', metrics)
}

/// Insert `open` before the first non-whitespace character and `close`
/// after the last one
///
/// Newline items are never treated as the span's ends. If nothing visible
/// is found the items are left untouched.
pub fn quote_with(
    items: &mut Vec<RenderItem>,
    open: char,
    close: char,
    metrics: &mut MetricsProvider,
) {
    let Some(first) = items.iter().position(is_visible) else {
        log::debug!("quote: nothing visible in {} items", items.len());
        return;
    };
    let last = items.iter().rposition(is_visible).unwrap_or(first);

    // Close first so that `first` stays a valid index
    if let Some(mark) = mark_like(&items[last], close, metrics) {
        items.insert(last + 1, mark);
    }
    if let Some(mark) = mark_like(&items[first], open, metrics) {
        items.insert(first, mark);
    }
}

fn is_visible(item: &RenderItem) -> bool {
    item.as_char()
        .is_some_and(|c| !c.character.is_whitespace())
}

fn mark_like(neighbor: &RenderItem, mark: char, metrics: &mut MetricsProvider) -> Option<RenderItem> {
    let neighbor = neighbor.as_char()?;
    let width = metrics.width(&neighbor.style, mark);
    Some(RenderItem::character(
        mark,
        width,
        neighbor.height,
        neighbor.style.clone(),
    ))
}
