//! List View State
//!
//! Filter, sort, archive and page state of one resource screen. Every
//! transition keeps `current_page` inside `[1, total_pages]`.

/// Rows per page on every resource screen
pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListState {
    /// false = active items, true = archived items
    pub archive_view: bool,
    pub search_term: String,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    /// 1-based
    pub current_page: usize,
    pub items_per_page: usize,
}

impl ListState {
    pub fn new(sort_field: &str) -> Self {
        Self {
            archive_view: false,
            search_term: String::new(),
            sort_field: sort_field.to_string(),
            sort_direction: SortDirection::Ascending,
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page.max(1);
        self
    }

    /// Same field flips direction, a new field starts ascending. Back to page 1 either way.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = field.to_string();
            self.sort_direction = SortDirection::Ascending;
        }
        self.current_page = 1;
    }

    pub fn set_archive_view(&mut self, archived: bool) {
        self.archive_view = archived;
        self.current_page = 1;
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.current_page = 1;
    }

    pub fn total_pages(&self, filtered_count: usize) -> usize {
        total_pages(filtered_count, self.items_per_page)
    }

    /// Pull `current_page` back into range after the filtered set shrank
    pub fn clamp_page(&mut self, filtered_count: usize) {
        let total = self.total_pages(filtered_count);
        if self.current_page > total {
            log::debug!("[ListState] clamping page {} -> {}", self.current_page, total);
            self.current_page = total;
        }
        if self.current_page == 0 {
            self.current_page = 1;
        }
    }

    pub fn go_to_page(&mut self, page: usize, filtered_count: usize) {
        self.current_page = page.clamp(1, self.total_pages(filtered_count));
    }
}

pub fn total_pages(filtered_count: usize, items_per_page: usize) -> usize {
    filtered_count.div_ceil(items_per_page.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_sort_flips_then_resets_on_new_field() {
        let mut state = ListState::new("name");
        state.current_page = 3;

        state.toggle_sort("name");
        assert_eq!(state.sort_field, "name");
        assert_eq!(state.sort_direction, SortDirection::Descending);
        assert_eq!(state.current_page, 1);

        state.toggle_sort("price");
        assert_eq!(state.sort_field, "price");
        assert_eq!(state.sort_direction, SortDirection::Ascending);

        state.toggle_sort("price");
        state.toggle_sort("price");
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_rescoping_resets_page() {
        let mut state = ListState::new("name");
        state.current_page = 4;
        state.set_search_term("soup");
        assert_eq!(state.current_page, 1);

        state.current_page = 2;
        state.set_archive_view(true);
        assert!(state.archive_view);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_total_pages_never_below_one() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut state = ListState::new("name");
        state.current_page = 2;
        state.clamp_page(5);
        assert_eq!(state.current_page, 1);

        state.current_page = 0;
        state.clamp_page(0);
        assert_eq!(state.current_page, 1);

        state.current_page = 2;
        state.clamp_page(11);
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_go_to_page_stays_in_range() {
        let mut state = ListState::new("name");
        state.go_to_page(9, 12);
        assert_eq!(state.current_page, 3);
        state.go_to_page(0, 12);
        assert_eq!(state.current_page, 1);
    }
}
