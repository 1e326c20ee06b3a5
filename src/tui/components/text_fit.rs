//! Fitting cell text into fixed terminal widths.
//!
//! Widths are measured in terminal columns, not chars, so Japanese text
//! (two columns per glyph) lines up with Latin text.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Truncates `text` to `max_width` columns, appending `...` when cut.
///
/// Widths of three or fewer fall back to dots only.
pub(crate) fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width <= ELLIPSIS.len() {
        return ".".repeat(max_width);
    }

    let target_width = max_width.saturating_sub(ELLIPSIS.len());
    let mut truncated = String::new();
    let mut current_width = 0_usize;
    for ch in text.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width.saturating_add(char_width) > target_width {
            break;
        }
        truncated.push(ch);
        current_width = current_width.saturating_add(char_width);
    }
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Truncates or right-pads `text` to exactly `width` columns.
///
/// Line breaks inside cell text are flattened to spaces first.
pub(crate) fn fit_cell(text: &str, width: usize) -> String {
    let flattened = text.replace(['\n', '\r', '\t'], " ");
    let mut cell = truncate_with_ellipsis(&flattened, width);
    let padding = width.saturating_sub(cell.width());
    cell.push_str(&" ".repeat(padding));
    cell
}
