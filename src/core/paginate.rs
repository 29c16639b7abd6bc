// WasteDesk - core/paginate.rs
//
// Page state and slicing for filtered record lists.
// Out-of-range page requests are clamped, never rejected.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::util::constants;

/// Current page (1-indexed) and fixed page size of one list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(constants::DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// Start on page 1. A zero page size is raised to the minimum.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(constants::MIN_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Request `page`, clamped into `[1, total_pages(total_items)]`.
    pub fn go_to(&mut self, page: usize, total_items: usize) {
        self.page = page;
        self.clamp(total_items);
    }

    pub fn first(&mut self) {
        self.page = 1;
    }

    /// Re-clamp after the item count changed. Returns true if the page moved.
    pub fn clamp(&mut self, total_items: usize) -> bool {
        let clamped = self
            .page
            .clamp(1, total_pages(total_items, self.page_size));
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }
}

/// Number of pages needed for `total_items`. Always at least 1.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    let page_size = page_size.max(constants::MIN_PAGE_SIZE);
    total_items.div_ceil(page_size).max(1)
}

/// One page cut from a filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    /// Items on the page, at most `page_size` of them.
    pub items: &'a [T],

    /// The page actually shown after clamping.
    pub page: usize,

    pub total_pages: usize,

    /// 1-based position of the first item shown, 0 when nothing is shown.
    pub start_item: usize,

    /// 1-based position of the last item shown, 0 when nothing is shown.
    pub end_item: usize,

    /// Length of the whole filtered sequence.
    pub total_items: usize,
}

/// Slice the page described by `state` out of `items`.
///
/// The requested page is clamped into range first, so the result is never
/// an empty page past the end of a non-empty sequence.
pub fn paginate<'a, T>(items: &'a [T], state: &PageState) -> PageSlice<'a, T> {
    let total_items = items.len();
    let page_size = state.page_size();
    let total_pages = total_pages(total_items, page_size);
    let page = state.page().clamp(1, total_pages);

    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);
    let slice = &items[start..end];

    let (start_item, end_item) = if slice.is_empty() {
        (0, 0)
    } else {
        (start + 1, end)
    };

    PageSlice {
        items: slice,
        page,
        total_pages,
        start_item,
        end_item,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten() -> Vec<u32> {
        (1..=10).collect()
    }

    #[test]
    fn test_first_page_of_ten() {
        let items = ten();
        let slice = paginate(&items, &PageState::new(5));
        assert_eq!(slice.items, &[1, 2, 3, 4, 5]);
        assert_eq!(slice.total_pages, 2);
        assert_eq!((slice.start_item, slice.end_item), (1, 5));
    }

    #[test]
    fn test_second_page_and_clamp_past_end() {
        let items = ten();
        let mut state = PageState::new(5);
        state.go_to(2, items.len());
        assert_eq!(paginate(&items, &state).items, &[6, 7, 8, 9, 10]);

        state.go_to(3, items.len());
        assert_eq!(state.page(), 2);
        let slice = paginate(&items, &state);
        assert_eq!(slice.page, 2);
        assert_eq!(slice.items, &[6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_page_zero_clamps_to_first() {
        let items = ten();
        let mut state = PageState::new(3);
        state.go_to(0, items.len());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_empty_has_one_page() {
        let items: Vec<u32> = Vec::new();
        let slice = paginate(&items, &PageState::new(5));
        assert_eq!(slice.total_pages, 1);
        assert_eq!(slice.page, 1);
        assert!(slice.items.is_empty());
        assert_eq!((slice.start_item, slice.end_item, slice.total_items), (0, 0, 0));
    }

    #[test]
    fn test_page_length_formula_holds() {
        for len in 0..=23usize {
            let items: Vec<usize> = (0..len).collect();
            for size in 1..=7usize {
                let pages = total_pages(len, size);
                assert!(pages >= 1);
                for page in 1..=pages {
                    let mut state = PageState::new(size);
                    state.go_to(page, len);
                    let slice = paginate(&items, &state);
                    let expected = size.min(len.saturating_sub((page - 1) * size));
                    assert_eq!(slice.items.len(), expected, "len={len} size={size} page={page}");
                    assert!(slice.items.len() <= size);
                    if expected > 0 {
                        assert_eq!(slice.end_item - slice.start_item + 1, expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_stale_page_is_clamped_when_slicing() {
        let items = ten();
        let mut state = PageState::new(5);
        state.go_to(2, items.len());
        let shrunk = &items[..4];
        let slice = paginate(shrunk, &state);
        assert_eq!(slice.page, 1);
        assert_eq!(slice.items, &[1, 2, 3, 4]);
    }

    #[test]
    fn test_clamp_reports_movement() {
        let mut state = PageState::new(5);
        state.go_to(2, 10);
        assert!(state.clamp(5));
        assert_eq!(state.page(), 1);
        assert!(!state.clamp(5));
    }

    #[test]
    fn test_zero_page_size_raised() {
        assert_eq!(PageState::new(0).page_size(), 1);
        assert_eq!(total_pages(3, 0), 3);
    }
}
