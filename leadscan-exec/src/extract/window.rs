// Context Window Builder
//
// Bounded text windows around a position. Offsets are bytes; window edges are
// moved outward to the nearest char boundary so snippets never split a
// multi-byte character.

use crate::types::ContactWindow;

/// Window of `radius` bytes either side of `center`
pub fn build_window(text: &str, center: usize, radius: usize) -> ContactWindow {
    let center = center.min(text.len());
    let start = floor_boundary(text, center.saturating_sub(radius));
    let end = ceil_boundary(text, center.saturating_add(radius));
    ContactWindow {
        center,
        radius,
        start,
        end,
        snippet: text[start..end].to_string(),
    }
}

/// Window of `radius` bytes either side of the span `[span_start, span_end)`
pub fn window_around_span(text: &str, span_start: usize, span_end: usize, radius: usize) -> ContactWindow {
    let span_start = span_start.min(text.len());
    let span_end = span_end.clamp(span_start, text.len());
    let start = floor_boundary(text, span_start.saturating_sub(radius));
    let end = ceil_boundary(text, span_end.saturating_add(radius));
    ContactWindow {
        center: span_start,
        radius,
        start,
        end,
        snippet: text[start..end].to_string(),
    }
}

/// Text slice `[from, to)` clamped and snapped to char boundaries
pub fn slice(text: &str, from: usize, to: usize) -> &str {
    let start = floor_boundary(text, from);
    let end = ceil_boundary(text, to).max(start);
    &text[start..end]
}

pub(crate) fn floor_boundary(text: &str, mut index: usize) -> usize {
    index = index.min(text.len());
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

pub(crate) fn ceil_boundary(text: &str, mut index: usize) -> usize {
    index = index.min(text.len());
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
