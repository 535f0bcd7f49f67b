//! Panel update windows

use crate::framebuffer::{PAGES, WIDTH};

/// Rectangle of columns and 8-pixel pages sent on a render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderArea {
    /// First column (inclusive)
    pub start_column: u8,
    /// Last column (inclusive)
    pub end_column: u8,
    /// First page (inclusive)
    pub start_page: u8,
    /// Last page (inclusive)
    pub end_page: u8,
}

impl RenderArea {
    /// The whole 128x64 panel
    pub const fn full() -> Self {
        Self {
            start_column: 0,
            end_column: (WIDTH - 1) as u8,
            start_page: 0,
            end_page: (PAGES - 1) as u8,
        }
    }

    /// Number of columns in the area
    pub fn width(&self) -> usize {
        usize::from(self.end_column.saturating_sub(self.start_column)) + 1
    }

    /// Number of pages in the area
    pub fn pages(&self) -> usize {
        usize::from(self.end_page.saturating_sub(self.start_page)) + 1
    }

    /// Bytes the panel expects for this area
    pub fn buffer_length(&self) -> usize {
        self.width() * self.pages()
    }

    /// Clip the area to the panel
    pub fn clamped(&self) -> Self {
        let end_column = self.end_column.min((WIDTH - 1) as u8);
        let end_page = self.end_page.min((PAGES - 1) as u8);
        Self {
            start_column: self.start_column.min(end_column),
            end_column,
            start_page: self.start_page.min(end_page),
            end_page,
        }
    }
}

impl Default for RenderArea {
    fn default() -> Self {
        Self::full()
    }
}
