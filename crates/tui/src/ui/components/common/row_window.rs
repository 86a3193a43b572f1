//! Visible window over a list of one-line rows.
//!
//! The window moves only as far as needed to reveal a row and never
//! recenters, so arrowing through a long list keeps the highlight pinned to
//! the edge it is travelling towards.

/// First visible row plus the list and window sizes, all in rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowWindow {
    first: u16,
    rows: u16,
    visible: u16,
}

impl RowWindow {
    /// Index of the topmost visible row.
    pub const fn first(&self) -> u16 {
        self.first
    }

    /// Highest `first` that still fills the window.
    fn last_first(&self) -> u16 {
        self.rows.saturating_sub(self.visible)
    }

    pub fn set_rows(&mut self, rows: u16) {
        self.rows = rows;
        self.first = self.first.min(self.last_first());
    }

    pub fn set_visible(&mut self, visible: u16) {
        self.visible = visible;
        self.first = self.first.min(self.last_first());
    }

    pub fn contains(&self, row: u16) -> bool {
        (self.first..self.first.saturating_add(self.visible)).contains(&row)
    }

    /// Slides the window to the nearest position that shows `row`.
    pub fn reveal(&mut self, row: u16) {
        if self.visible == 0 || self.contains(row) {
            return;
        }
        let first = if row < self.first { row } else { row + 1 - self.visible };
        self.first = first.min(self.last_first());
    }
}
