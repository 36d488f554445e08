//! Leptos ListView
//!
//! One generic list controller for every resource screen: filter by archive
//! state, search, sort and paginate an in-memory list fetched from a backend.

mod controller;
mod entity;
mod generation;
mod pipeline;
mod state;

pub use controller::{
    create_list_controller, make_on_archive_toggle, make_on_page_click, make_on_search_input,
    make_on_sort_click, ListController,
};
pub use entity::{
    collapse_ids, deserialize_id, Entity, FieldValue, Labeled, Listable, LooseNumber, Ref,
};
pub use generation::{RequestGeneration, Ticket};
pub use pipeline::{compute_visible, filter_and_sort, filtered_count, matches_search, VisiblePage};
pub use state::{total_pages, ListState, SortDirection, DEFAULT_ITEMS_PER_PAGE};
