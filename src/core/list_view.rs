// WasteDesk - core/list_view.rs
//
// One list screen: a record collection, its filter selections, and its
// page position. Every transition (filter change, page change, reset,
// record change) recomputes the filtered set and clamps the page in one
// step, so callers never observe a page that is invalid for the current
// filters.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::filter::{apply_filters, FilterSet, FilterState, FilterValue};
use crate::core::paginate::{paginate, PageState};
use crate::core::record::ListRecord;
use crate::util::error::FilterError;

/// What the rendering layer receives for one page of a list view.
#[derive(Debug, Clone)]
pub struct ViewSnapshot<'a, R> {
    /// Records on the current page, in filtered order.
    pub items: Vec<&'a R>,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,

    /// 1-based index of the first item shown, 0 when the page is empty.
    pub start_item: usize,

    /// 1-based index of the last item shown, 0 when the page is empty.
    pub end_item: usize,

    /// Records passing the filters.
    pub filtered_count: usize,

    /// Records in the view before filtering.
    pub record_count: usize,

    pub active_filters: usize,
}

impl<R> ViewSnapshot<'_, R> {
    /// True when filters exclude every record (the "no results" state).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A filterable, paginated list of `R`.
pub struct ListView<R: ListRecord> {
    records: Vec<R>,
    filters: FilterSet<R>,
    filter_state: FilterState,
    page_state: PageState,

    /// Indices into `records` that pass the current filters.
    filtered_indices: Vec<usize>,
}

impl<R: ListRecord> ListView<R> {
    /// Open a view over `records` with no filters, on page 1.
    pub fn new(records: Vec<R>, page_size: usize) -> Self {
        let mut view = Self {
            records,
            filters: R::filters(),
            filter_state: FilterState::default(),
            page_state: PageState::new(page_size),
            filtered_indices: Vec::new(),
        };
        view.recompute();
        view
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn filters(&self) -> &FilterSet<R> {
        &self.filters
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter_state
    }

    pub fn page_state(&self) -> PageState {
        self.page_state
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered_indices.len()
    }

    /// All records passing the filters, across every page.
    pub fn filtered(&self) -> Vec<&R> {
        self.filtered_indices
            .iter()
            .map(|&idx| &self.records[idx])
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Replace one filter's value and return to page 1.
    pub fn set_filter(&mut self, name: &str, value: FilterValue) -> Result<(), FilterError> {
        let def = self.filters.lookup(name)?;
        if !def.accepts(&value) {
            return Err(FilterError::ValueMismatch {
                filter: def.name.to_string(),
                expected: def.kind.describe(),
            });
        }
        let name = def.name;
        tracing::debug!(view = self.filters.view(), filter = name, value = %value, "Filter changed");
        self.filter_state.set(name, value);
        self.page_state.first();
        self.recompute();
        Ok(())
    }

    /// Parse raw user input for filter `name`, then apply it like `set_filter`.
    pub fn set_filter_input(&mut self, name: &str, raw: &str) -> Result<(), FilterError> {
        let value = self.filters.lookup(name)?.parse(raw)?;
        self.set_filter(name, value)
    }

    /// Drop one filter and return to page 1.
    pub fn clear_filter(&mut self, name: &str) -> Result<(), FilterError> {
        let name = self.filters.lookup(name)?.name;
        self.filter_state.clear(name);
        self.page_state.first();
        self.recompute();
        Ok(())
    }

    /// Restore every filter to "no constraint" and return to page 1.
    pub fn reset_filters(&mut self) {
        tracing::debug!(view = self.filters.view(), "Filters reset");
        self.filter_state.reset();
        self.page_state.first();
        self.recompute();
    }

    /// Move to `page`, clamped into the valid range.
    pub fn change_page(&mut self, page: usize) {
        self.page_state.go_to(page, self.filtered_indices.len());
        tracing::debug!(
            view = self.filters.view(),
            requested = page,
            page = self.page_state.page(),
            "Page changed"
        );
    }

    pub fn next_page(&mut self) {
        self.change_page(self.page_state.page().saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.change_page(self.page_state.page().saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.change_page(1);
    }

    pub fn last_page(&mut self) {
        self.change_page(usize::MAX);
    }

    /// Append a record. Filters and page position are kept.
    pub fn push(&mut self, record: R) {
        self.records.push(record);
        self.recompute();
    }

    /// Remove the record with `id`, clamping the page if it shrank.
    pub fn remove(&mut self, id: &str) -> Option<R> {
        let pos = self.records.iter().position(|r| r.id() == id)?;
        let removed = self.records.remove(pos);
        self.recompute();
        Some(removed)
    }

    /// Mutate the record with `id` in place. The record may stop matching
    /// the filters, in which case it leaves the visible set.
    pub fn update<T>(&mut self, id: &str, change: impl FnOnce(&mut R) -> T) -> Option<T> {
        let record = self.records.iter_mut().find(|r| r.id() == id)?;
        let result = change(record);
        self.recompute();
        Some(result)
    }

    fn recompute(&mut self) {
        self.filtered_indices = apply_filters(&self.records, &self.filters, &self.filter_state);
        if self.page_state.clamp(self.filtered_indices.len()) {
            tracing::debug!(
                view = self.filters.view(),
                page = self.page_state.page(),
                "Page clamped after record set shrank"
            );
        }
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// The current page, ready for rendering.
    pub fn snapshot(&self) -> ViewSnapshot<'_, R> {
        let slice = paginate(&self.filtered_indices, &self.page_state);
        ViewSnapshot {
            items: slice.items.iter().map(|&idx| &self.records[idx]).collect(),
            page: slice.page,
            total_pages: slice.total_pages,
            page_size: self.page_state.page_size(),
            start_item: slice.start_item,
            end_item: slice.end_item,
            filtered_count: slice.total_items,
            record_count: self.records.len(),
            active_filters: self.filter_state.active_count(),
        }
    }
}
