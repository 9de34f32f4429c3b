//! Selection, scrolling and pointer feedback for the results table.

use std::time::{Duration, Instant};

use ratatui::layout::{Position, Rect};

/// How long a pressed row stays highlighted.
pub const PRESS_FLASH: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Default)]
pub struct ResultsView {
    /// Index of the selected row.
    pub selected: usize,
    /// First visible row.
    pub offset: usize,
    /// Row under the mouse pointer.
    pub hovered: Option<usize>,
    /// Row that was clicked, and when.
    pub pressed: Option<(usize, Instant)>,
    /// Screen area of the table body (rows only, no header or border).
    pub body: Rect,
}

impl ResultsView {
    /// Resets selection and pointer state for a new result set.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
        self.hovered = None;
        self.pressed = None;
    }

    fn visible_rows(&self) -> usize {
        usize::from(self.body.height).max(1)
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.ensure_visible();
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.ensure_visible();
    }

    pub fn select(&mut self, index: usize, len: usize) {
        if index < len {
            self.selected = index;
            self.ensure_visible();
        }
    }

    /// Clamps selection and offset after the result set or viewport changed.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
        if self.hovered.is_some_and(|row| row >= len) {
            self.hovered = None;
        }
        self.ensure_visible();
    }

    fn ensure_visible(&mut self) {
        let visible = self.visible_rows();
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible {
            self.offset = self.selected + 1 - visible;
        }
    }

    /// Maps a screen position to a row index, if it lands on a row.
    pub fn row_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        if !self.body.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.offset + usize::from(row - self.body.y);
        (index < len).then_some(index)
    }

    pub fn hover(&mut self, row: Option<usize>) {
        self.hovered = row;
    }

    pub fn press(&mut self, index: usize, now: Instant) {
        self.pressed = Some((index, now));
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        self.pressed.is_some_and(|(row, _)| row == index)
    }

    pub fn has_pending_flash(&self) -> bool {
        self.pressed.is_some()
    }

    /// Clears the press flash once it has been shown long enough.
    pub fn expire_press(&mut self, now: Instant) {
        if let Some((_, at)) = self.pressed
            && now.saturating_duration_since(at) >= PRESS_FLASH
        {
            self.pressed = None;
        }
    }
}
