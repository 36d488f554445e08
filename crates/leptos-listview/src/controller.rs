//! Reactive List Controller
//!
//! Signals for one resource screen plus handler factories for the table
//! chrome (search box, archive switch, sort headers, pager).

use std::fmt::Display;
use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::entity::Listable;
use crate::generation::{RequestGeneration, Ticket};
use crate::pipeline::{compute_visible, filtered_count, VisiblePage};
use crate::state::ListState;

/// List signals for one screen
pub struct ListController<T: Send + Sync + 'static> {
    /// Raw list as last fetched, all archive states
    pub items: RwSignal<Vec<T>>,
    pub state: RwSignal<ListState>,
    pub loading: RwSignal<bool>,
    /// Screen-level fetch error, shown in place of the table
    pub error: RwSignal<Option<String>>,
    generation: StoredValue<RequestGeneration>,
}

impl<T: Send + Sync + 'static> Clone for ListController<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListController<T> {}

pub fn create_list_controller<T: Send + Sync + 'static>(
    sort_field: &str,
    items_per_page: usize,
) -> ListController<T> {
    ListController {
        items: RwSignal::new(Vec::new()),
        state: RwSignal::new(ListState::new(sort_field).with_items_per_page(items_per_page)),
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
        generation: StoredValue::new(RequestGeneration::default()),
    }
}

impl<T> ListController<T>
where
    T: Listable + Clone + PartialEq + Send + Sync + 'static,
{
    /// Derived page of rows; create once per component
    pub fn visible(&self) -> Memo<VisiblePage<T>> {
        let items = self.items;
        let state = self.state;
        Memo::new(move |_| state.with(|st| items.with(|list| compute_visible(list, st))))
    }

    pub fn toggle_sort(&self, field: &str) {
        self.state.update(|st| st.toggle_sort(field));
    }

    pub fn set_search_term(&self, term: &str) {
        self.state.update(|st| st.set_search_term(term));
    }

    pub fn set_archive_view(&self, archived: bool) {
        self.state.update(|st| st.set_archive_view(archived));
    }

    pub fn go_to_page(&self, page: usize) {
        let count = self.filtered_count_untracked();
        self.state.update(|st| st.go_to_page(page, count));
    }

    fn filtered_count_untracked(&self) -> usize {
        self.state
            .with_untracked(|st| self.items.with_untracked(|list| filtered_count(list, st)))
    }

    /// Start a fetch; newer fetches invalidate this ticket
    pub fn begin_fetch(&self) -> Ticket {
        let mut generation = self.generation.get_value();
        let ticket = generation.begin();
        self.generation.set_value(generation);
        self.loading.set(true);
        ticket
    }

    /// Apply a fetch result if its ticket is still current.
    /// Replaces the list wholesale and clamps the page in the same update.
    pub fn finish_fetch(&self, ticket: Ticket, result: Result<Vec<T>, String>) -> bool {
        if !self.generation.get_value().is_current(ticket) {
            log::debug!("[ListController] dropping stale response {:?}", ticket);
            return false;
        }

        match result {
            Ok(list) => {
                let count = self.state.with_untracked(|st| filtered_count(&list, st));
                log::debug!("[ListController] loaded {} items ({} visible)", list.len(), count);
                self.items.set(list);
                let out_of_range = self
                    .state
                    .with_untracked(|st| st.current_page > st.total_pages(count));
                if out_of_range {
                    self.state.update(|st| st.clamp_page(count));
                }
                self.error.set(None);
            }
            Err(message) => {
                log::warn!("[ListController] fetch failed: {}", message);
                self.error.set(Some(message));
            }
        }
        self.loading.set(false);
        true
    }

    /// Release the loading flag without touching the list (failed mutation)
    pub fn abandon_fetch(&self, ticket: Ticket) {
        if self.generation.get_value().is_current(ticket) {
            self.loading.set(false);
        }
    }

    /// Run a list fetch in the background under a fresh ticket
    pub fn spawn_fetch<F, E>(self, fetch: F)
    where
        F: Future<Output = Result<Vec<T>, E>> + 'static,
        E: Display,
    {
        let ticket = self.begin_fetch();
        spawn_local(async move {
            let result = fetch.await.map_err(|e| e.to_string());
            self.finish_fetch(ticket, result);
        });
    }
}

// ========================
// Handler Factories
// ========================

pub fn make_on_search_input<T>(
    ctrl: ListController<T>,
) -> impl Fn(leptos::ev::Event) + Copy + 'static
where
    T: Listable + Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: leptos::ev::Event| ctrl.set_search_term(&event_target_value(&ev))
}

pub fn make_on_archive_toggle<T>(
    ctrl: ListController<T>,
    archived: bool,
) -> impl Fn(leptos::ev::MouseEvent) + Copy + 'static
where
    T: Listable + Clone + PartialEq + Send + Sync + 'static,
{
    move |_| ctrl.set_archive_view(archived)
}

pub fn make_on_sort_click<T>(
    ctrl: ListController<T>,
    field: &'static str,
) -> impl Fn(leptos::ev::MouseEvent) + Copy + 'static
where
    T: Listable + Clone + PartialEq + Send + Sync + 'static,
{
    move |_| ctrl.toggle_sort(field)
}

pub fn make_on_page_click<T>(
    ctrl: ListController<T>,
    page: usize,
) -> impl Fn(leptos::ev::MouseEvent) + Copy + 'static
where
    T: Listable + Clone + PartialEq + Send + Sync + 'static,
{
    move |_| ctrl.go_to_page(page)
}
