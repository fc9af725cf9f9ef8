//! Fixed-size, zero-indexed pagination.

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the page-size selector
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_index: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Create pagination on the first page; page size is at least 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Requested page index, before clamping to the row count.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Number of pages for `total` rows; zero rows means zero pages.
    pub fn page_count(&self, total: usize) -> usize {
        (total + self.page_size - 1) / self.page_size
    }

    /// Page index clamped to `[0, page_count - 1]`.
    pub fn current_page(&self, total: usize) -> usize {
        self.page_index
            .min(self.page_count(total).saturating_sub(1))
    }

    /// Row range `start..end` of the current page.
    pub fn bounds(&self, total: usize) -> (usize, usize) {
        let start = (self.current_page(total) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        (start, end)
    }

    pub fn can_previous(&self, total: usize) -> bool {
        self.current_page(total) > 0
    }

    pub fn can_next(&self, total: usize) -> bool {
        self.current_page(total) + 1 < self.page_count(total)
    }

    /// Move forward one page, staying on the last page.
    pub fn next_page(&mut self, total: usize) {
        self.page_index = (self.current_page(total) + 1)
            .min(self.page_count(total).saturating_sub(1));
    }

    /// Move back one page, staying on the first page.
    pub fn previous_page(&mut self, total: usize) {
        self.page_index = self.current_page(total).saturating_sub(1);
    }

    /// Jump to a page, clamped to the available pages.
    pub fn set_page_index(&mut self, index: usize, total: usize) {
        self.page_index = index.min(self.page_count(total).saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.page_index = 0;
    }

    pub fn last_page(&mut self, total: usize) {
        self.page_index = self.page_count(total).saturating_sub(1);
    }

    /// Change the page size, keeping the first visible row on screen.
    pub fn set_page_size(&mut self, page_size: usize) {
        let top_row = self.page_index * self.page_size;
        self.page_size = page_size.max(1);
        self.page_index = top_row / self.page_size;
    }
}
