//! Cursor position within the visible rows.
//!
//! The cursor is retained when filters change and clamped to the new range.

/// Cursor and scroll offset over a list of visible rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCursor {
    /// Current cursor position (0-indexed) within the visible rows.
    pub position: usize,
    /// Scroll offset for virtual scrolling (rows scrolled from top).
    pub scroll_offset: usize,
}

impl RowCursor {
    /// Clamps the cursor position to be within the valid range.
    ///
    /// If the list is empty, cursor is set to 0. If cursor exceeds the list
    /// length, it is set to the last valid index.
    pub const fn clamp(&mut self, count: usize) {
        if count == 0 {
            self.position = 0;
            self.scroll_offset = 0;
        } else if self.position >= count {
            self.position = count.saturating_sub(1);
        }
    }

    /// Moves the cursor up by one row if possible.
    pub const fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Moves the cursor down by one row if within bounds.
    pub const fn down(&mut self, max_index: usize) {
        if self.position < max_index {
            self.position = self.position.saturating_add(1);
        }
    }

    /// Moves the cursor up by a page.
    pub const fn page_up(&mut self, page_size: usize) {
        self.position = self.position.saturating_sub(page_size);
    }

    /// Moves the cursor down by a page, stopping at the last row.
    pub const fn page_down(&mut self, page_size: usize, max_index: usize) {
        let new_pos = self.position.saturating_add(page_size);
        self.position = if new_pos < max_index { new_pos } else { max_index };
    }

    /// Moves the cursor to the first row.
    pub const fn home(&mut self) {
        self.position = 0;
        self.scroll_offset = 0;
    }

    /// Moves the cursor to the last row.
    pub const fn end(&mut self, max_index: usize) {
        self.position = max_index;
    }

    /// Adjusts the scroll offset so the cursor stays within `height` rows.
    pub const fn scroll_into_view(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.position < self.scroll_offset {
            self.scroll_offset = self.position;
        } else if self.position >= self.scroll_offset.saturating_add(height) {
            self.scroll_offset = self.position.saturating_sub(height.saturating_sub(1));
        }
    }
}
