//! Visible Slice Pipeline
//!
//! archive filter -> search filter -> stable sort -> paginate.
//! Pure: the visible slice is derived, never stored.

use crate::entity::Listable;
use crate::state::{ListState, SortDirection};

/// One rendered page plus the counts pagination needs
#[derive(Clone, Debug, PartialEq)]
pub struct VisiblePage<T> {
    pub rows: Vec<T>,
    pub total_pages: usize,
    pub filtered_count: usize,
}

impl<T> Default for VisiblePage<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total_pages: 1,
            filtered_count: 0,
        }
    }
}

/// Any designated field contains the (already lower-cased) needle
pub fn matches_search<T: Listable>(item: &T, needle: &str) -> bool {
    needle.is_empty()
        || item
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Archive and search stages, in that order, sorted
pub fn filter_and_sort<'a, T: Listable>(items: &'a [T], state: &ListState) -> Vec<&'a T> {
    let needle = state.search_term.to_lowercase();
    let mut filtered: Vec<&T> = items
        .iter()
        .filter(|item| item.is_archived() == state.archive_view)
        .filter(|item| matches_search(*item, &needle))
        .collect();

    // sort_by is stable: equal keys keep server order
    filtered.sort_by(|a, b| {
        let ordering = a
            .sort_value(&state.sort_field)
            .compare(&b.sort_value(&state.sort_field));
        match state.sort_direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    filtered
}

pub fn filtered_count<T: Listable>(items: &[T], state: &ListState) -> usize {
    let needle = state.search_term.to_lowercase();
    items
        .iter()
        .filter(|item| item.is_archived() == state.archive_view && matches_search(*item, &needle))
        .count()
}

pub fn compute_visible<T: Listable + Clone>(items: &[T], state: &ListState) -> VisiblePage<T> {
    let filtered = filter_and_sort(items, state);
    let per_page = state.items_per_page.max(1);
    let start = state.current_page.saturating_sub(1) * per_page;
    let rows = filtered
        .iter()
        .skip(start)
        .take(per_page)
        .map(|item| (*item).clone())
        .collect();

    VisiblePage {
        rows,
        total_pages: state.total_pages(filtered.len()),
        filtered_count: filtered.len(),
    }
}
