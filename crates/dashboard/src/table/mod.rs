//! Table engine: derives the visible row window from the user list.
//!
//! `TableState` holds interaction state only. `TableState::view` is a pure
//! function of that state and the list: filter (global AND per-column), then
//! sort, then paginate.

pub mod columns;
pub mod filter;
pub mod pagination;
pub mod selection;
pub mod sort;

use std::collections::{BTreeMap, BTreeSet};

use domain::{User, UserId};

pub use columns::{capitalize, Column, FilterColumn};
pub use filter::{matches_global, ColumnFilters};
pub use pagination::{Pagination, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use selection::RowSelection;
pub use sort::{SortDirection, SortKey, Sorting};

/// Interaction state of the user table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    sorting: Sorting,
    column_filters: ColumnFilters,
    global_filter: String,
    pagination: Pagination,
    selection: RowSelection,
    hidden_columns: BTreeSet<Column>,
}

impl TableState {
    /// Create state with the given page size and nothing filtered or sorted.
    pub fn new(page_size: usize) -> Self {
        Self {
            pagination: Pagination::new(page_size),
            ..Default::default()
        }
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    /// Set the search text; an empty string disables the global filter.
    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.global_filter {
            self.global_filter = text;
            self.pagination.first_page();
        }
    }

    pub fn column_filters(&self) -> &ColumnFilters {
        &self.column_filters
    }

    /// Set one column filter; an empty value clears it.
    pub fn set_column_filter(&mut self, column: FilterColumn, value: impl Into<String>) {
        if self.column_filters.set(column, value) {
            self.pagination.first_page();
        }
    }

    pub fn clear_column_filter(&mut self, column: FilterColumn) {
        if self.column_filters.clear(column) {
            self.pagination.first_page();
        }
    }

    /// Clear every column filter, keeping the search text.
    pub fn reset_column_filters(&mut self) {
        if self.column_filters.reset() {
            self.pagination.first_page();
        }
    }

    /// Whether any global or column filter is active.
    pub fn is_filtered(&self) -> bool {
        !self.global_filter.is_empty() || !self.column_filters.is_empty()
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    pub fn sorting(&self) -> &Sorting {
        &self.sorting
    }

    /// Advance a column through unsorted, ascending, descending.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sorting.toggle(column);
        self.pagination.first_page();
    }

    /// Advance a column while keeping the other sorted columns.
    pub fn toggle_sort_multi(&mut self, column: Column) {
        self.sorting.toggle_multi(column);
        self.pagination.first_page();
    }

    /// Sort by exactly one column and direction.
    pub fn set_sort(&mut self, column: Column, direction: SortDirection) {
        self.sorting.set(column, direction);
        self.pagination.first_page();
    }

    /// Replace the whole sort stack.
    pub fn set_sort_keys(&mut self, keys: Vec<SortKey>) {
        self.sorting.set_keys(keys);
        self.pagination.first_page();
    }

    pub fn clear_sort(&mut self) {
        self.sorting.clear();
        self.pagination.first_page();
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn next_page(&mut self, users: &[User]) {
        let total = self.filtered_count(users);
        self.pagination.next_page(total);
    }

    pub fn previous_page(&mut self, users: &[User]) {
        let total = self.filtered_count(users);
        self.pagination.previous_page(total);
    }

    pub fn set_page_index(&mut self, index: usize, users: &[User]) {
        let total = self.filtered_count(users);
        self.pagination.set_page_index(index, total);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
    }

    // =========================================================================
    // Selection & Visibility
    // =========================================================================

    pub fn selection(&self) -> &RowSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut RowSelection {
        &mut self.selection
    }

    pub fn toggle_row(&mut self, id: UserId) -> bool {
        self.selection.toggle(id)
    }

    /// Header checkbox: select every row of the current page, or deselect
    /// them if they are all selected already.
    pub fn toggle_page_selection(&mut self, users: &[User]) {
        let ids = self.view(users).row_ids();
        if self.selection.all_selected(ids.iter().copied()) {
            self.selection.deselect_all(ids);
        } else {
            self.selection.select_all(ids);
        }
    }

    pub fn is_column_visible(&self, column: Column) -> bool {
        !self.hidden_columns.contains(&column)
    }

    pub fn set_column_visibility(&mut self, column: Column, visible: bool) {
        if visible {
            self.hidden_columns.remove(&column);
        } else {
            self.hidden_columns.insert(column);
        }
    }

    pub fn toggle_column_visibility(&mut self, column: Column) {
        let visible = self.is_column_visible(column);
        self.set_column_visibility(column, !visible);
    }

    pub fn visible_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|column| self.is_column_visible(*column))
            .collect()
    }

    // =========================================================================
    // Derivation
    // =========================================================================

    /// Rows passing the global filter and every column filter, in list order.
    pub fn filtered_rows<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        let needle = self.global_filter.to_lowercase();
        users
            .iter()
            .filter(|user| matches_global(user, &needle) && self.column_filters.matches(user))
            .collect()
    }

    pub fn filtered_count(&self, users: &[User]) -> usize {
        self.filtered_rows(users).len()
    }

    /// Filtered rows ordered by the sort stack.
    pub fn sorted_rows<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        let mut rows = self.filtered_rows(users);
        self.sorting.apply(&mut rows);
        rows
    }

    /// Value counts for a filterable column, over rows passing the global
    /// filter and every other column filter.
    pub fn facets(&self, users: &[User], column: FilterColumn) -> BTreeMap<String, usize> {
        let needle = self.global_filter.to_lowercase();
        let mut counts = BTreeMap::new();
        for user in users.iter().filter(|user| {
            matches_global(user, &needle) && self.column_filters.matches_except(user, column)
        }) {
            *counts.entry(column.value(user).to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Derive the visible window.
    pub fn view<'a>(&self, users: &'a [User]) -> TableView<'a> {
        let sorted = self.sorted_rows(users);
        let filtered_rows = sorted.len();
        let (start, end) = self.pagination.bounds(filtered_rows);

        TableView {
            rows: sorted[start..end].to_vec(),
            columns: self.visible_columns(),
            total_rows: users.len(),
            filtered_rows,
            page_index: self.pagination.current_page(filtered_rows),
            page_size: self.pagination.page_size(),
            page_count: self.pagination.page_count(filtered_rows),
        }
    }
}

/// The derived, read-only table window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView<'a> {
    /// Rows of the current page
    pub rows: Vec<&'a User>,
    /// Visible columns, in display order
    pub columns: Vec<Column>,
    /// Rows in the full list
    pub total_rows: usize,
    /// Rows left after filtering
    pub filtered_rows: usize,
    /// Clamped zero-based page index
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
}

impl TableView<'_> {
    pub fn row_ids(&self) -> Vec<UserId> {
        self.rows.iter().map(|u| u.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    /// One-based `(first, last)` row numbers shown, `None` when empty.
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = self.page_index * self.page_size + 1;
        Some((first, first + self.rows.len() - 1))
    }

    /// Footer text, e.g. `Showing 1 to 10 of 25 results (Page 1 of 3)`.
    pub fn summary(&self) -> String {
        match self.range() {
            Some((first, last)) => format!(
                "Showing {} to {} of {} results (Page {} of {})",
                first,
                last,
                self.filtered_rows,
                self.page_index + 1,
                self.page_count
            ),
            None => "No results".to_string(),
        }
    }
}
