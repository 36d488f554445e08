//! Resource Screen Component
//!
//! Generic list screen shared by every resource: search box, Active/Archived
//! toggle, sortable headers, row actions and a pager, driven by a
//! ListController. Add/Edit/View open the EntityModal unless the screen
//! brings its own editor.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listview::{
    create_list_controller, make_on_archive_toggle, make_on_page_click, make_on_search_input,
    make_on_sort_click, Entity, ListController, Listable,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{mutate_then_list, Mutation, ResourceApi, ResourceDef, RestResource};
use crate::components::{DeleteConfirmButton, EntityModal};
use crate::context::use_app_context;
use crate::error::MutationFailure;
use crate::forms::FieldDef;
use crate::store::{store_notify_error, store_notify_success, use_app_store, AppStore};

/// Everything a resource screen needs from its row type
pub trait ScreenEntity:
    Listable + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> ScreenEntity for T where
    T: Listable + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// One table column; `key` doubles as the sort field
pub struct Column<T: 'static> {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub cell: fn(&T) -> String,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T> Column<T> {
    pub const fn sortable(key: &'static str, label: &'static str, cell: fn(&T) -> String) -> Self {
        Self { key, label, sortable: true, cell }
    }

    pub const fn plain(key: &'static str, label: &'static str, cell: fn(&T) -> String) -> Self {
        Self { key, label, sortable: false, cell }
    }
}

/// Static description of one resource screen
pub struct ScreenDef<T: 'static> {
    pub title: &'static str,
    pub resource: &'static ResourceDef,
    pub columns: &'static [Column<T>],
    pub form: &'static [FieldDef],
    pub default_sort: &'static str,
    /// Extra CSS class per row
    pub row_class: Option<fn(&T) -> &'static str>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModalMode<T> {
    Add,
    Edit(T),
    View(T),
}

impl<T> ModalMode<T> {
    pub fn title(&self, noun: &str) -> String {
        match self {
            ModalMode::Add => format!("Add {noun}"),
            ModalMode::Edit(_) => format!("Edit {noun}"),
            ModalMode::View(_) => capitalize(noun),
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, ModalMode::View(_))
    }
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ========================
// List Loading & Mutations
// ========================

/// Controller for a screen, with the initial fetch already under way
pub fn create_resource_list<T: ScreenEntity>(screen: &'static ScreenDef<T>) -> ListController<T> {
    let ctx = use_app_context();
    let ctrl = create_list_controller::<T>(screen.default_sort, ctx.config.items_per_page);
    refetch(ctrl, ctx.api.resource(screen.resource));
    ctrl
}

pub fn refetch<T: ScreenEntity>(ctrl: ListController<T>, api: RestResource<T>) {
    log::debug!("[ResourceScreen] fetching {}", api.def().path);
    ctrl.spawn_fetch(async move { api.list().await });
}

/// Send a mutation, then replace the list with a fresh fetch.
/// `on_saved` runs once the backend accepted the change.
pub fn run_mutation<T: ScreenEntity>(
    ctrl: ListController<T>,
    api: RestResource<T>,
    mutation: Mutation,
    store: AppStore,
    on_saved: impl FnOnce() + 'static,
) {
    let ticket = ctrl.begin_fetch();
    let noun = api.def().name;
    log::info!("[ResourceScreen] {} {}", noun, mutation.verb());
    spawn_local(async move {
        match mutate_then_list::<T, _>(&api, &mutation).await {
            Ok(list) => {
                ctrl.finish_fetch(ticket, Ok(list));
                store_notify_success(&store, format!("{} {}", capitalize(noun), mutation.verb()));
                on_saved();
            }
            Err(MutationFailure::Rejected(err)) => {
                ctrl.abandon_fetch(ticket);
                store_notify_error(&store, err.to_string());
            }
            Err(failure) => {
                let message = failure.to_string();
                ctrl.finish_fetch(ticket, Err(message.clone()));
                store_notify_error(&store, message);
                on_saved();
            }
        }
    });
}

// ========================
// Component
// ========================

#[component]
pub fn ResourceScreen<T>(
    screen: &'static ScreenDef<T>,
    ctrl: ListController<T>,
    /// Replaces the modal for Add (`None`) and Edit (`Some`)
    #[prop(optional)]
    on_edit: Option<Callback<Option<T>>>,
) -> impl IntoView
where
    T: ScreenEntity,
{
    let ctx = use_app_context();
    let store = use_app_store();
    let api = StoredValue::new(ctx.api.resource::<T>(screen.resource));
    let visible = ctrl.visible();
    let modal = RwSignal::new(None::<ModalMode<T>>);
    let busy = Signal::derive(move || ctrl.loading.get());

    let open_editor = move |item: Option<T>| match on_edit {
        Some(callback) => callback.run(item),
        None => modal.set(Some(item.map_or(ModalMode::Add, ModalMode::Edit))),
    };
    let mutate = move |mutation: Mutation| {
        run_mutation(ctrl, api.get_value(), mutation, store, || {});
    };

    let toggle_class = move |archived: bool| {
        move || {
            if ctrl.state.with(|st| st.archive_view) == archived {
                "toggle-btn active"
            } else {
                "toggle-btn"
            }
        }
    };

    let headers = move || {
        screen
            .columns
            .iter()
            .map(|col| {
                let col = *col;
                if col.sortable {
                    let arrow = move || {
                        ctrl.state.with(|st| {
                            if st.sort_field == col.key {
                                st.sort_direction.arrow()
                            } else {
                                ""
                            }
                        })
                    };
                    view! {
                        <th class="sortable" on:click=make_on_sort_click(ctrl, col.key)>
                            {col.label}" "{arrow}
                        </th>
                    }
                    .into_any()
                } else {
                    view! { <th>{col.label}</th> }.into_any()
                }
            })
            .collect_view()
    };

    let rows = move || {
        let archived_view = ctrl.state.with(|st| st.archive_view);
        visible
            .get()
            .rows
            .into_iter()
            .map(|item| {
                let id = item.id().to_string();
                let row_class = screen.row_class.map(|class_of| class_of(&item)).unwrap_or("");
                let cells = screen
                    .columns
                    .iter()
                    .map(|col| view! { <td>{(col.cell)(&item)}</td> })
                    .collect_view();
                let view_item = item.clone();
                let show = move |_: leptos::ev::MouseEvent| {
                    modal.set(Some(ModalMode::View(view_item.clone())));
                };
                let archive_id = id.clone();
                let delete_id = id;
                let on_delete: Callback<()> =
                    Callback::new(move |_| mutate(Mutation::Delete(delete_id.clone())));
                view! {
                    <tr class=row_class>
                        {cells}
                        <td class="row-actions">
                            <button
                                class="row-btn"
                                on:click=show
                            >
                                "View"
                            </button>
                            <button
                                class="row-btn"
                                disabled=move || busy.get()
                                on:click=move |_| open_editor(Some(item.clone()))
                            >
                                "Edit"
                            </button>
                            <button
                                class="row-btn"
                                disabled=move || busy.get()
                                on:click=move |_| {
                                    let id = archive_id.clone();
                                    mutate(if archived_view {
                                        Mutation::Restore(id)
                                    } else {
                                        Mutation::Archive(id)
                                    });
                                }
                            >
                                {if archived_view { "Restore" } else { "Archive" }}
                            </button>
                            <DeleteConfirmButton
                                disabled=busy
                                on_confirm=on_delete
                            />
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    let pager = move || {
        let current = ctrl.state.with(|st| st.current_page);
        let total = visible.with(|page| page.total_pages);
        (1..=total)
            .map(|page| {
                let class = if page == current { "page-btn active" } else { "page-btn" };
                view! {
                    <button class=class on:click=make_on_page_click(ctrl, page)>
                        {page}
                    </button>
                }
            })
            .collect_view()
    };
    let step_page = move |delta: isize| {
        let current = ctrl.state.with_untracked(|st| st.current_page);
        ctrl.go_to_page(current.saturating_add_signed(delta).max(1));
    };

    view! {
        <section class="resource-screen">
            <header class="screen-header">
                <h2>{screen.title}</h2>
                <button
                    class="primary-btn"
                    disabled=move || busy.get()
                    on:click=move |_| open_editor(None)
                >
                    {format!("Add {}", screen.resource.name)}
                </button>
                <button class="secondary-btn" on:click=move |_| refetch(ctrl, api.get_value())>
                    "Refresh"
                </button>
            </header>

            <div class="list-toolbar">
                <input
                    type="search"
                    placeholder="Search..."
                    prop:value=move || ctrl.state.with(|st| st.search_term.clone())
                    on:input=make_on_search_input(ctrl)
                />
                <div class="archive-toggle">
                    <button class=toggle_class(false) on:click=make_on_archive_toggle(ctrl, false)>
                        "Active"
                    </button>
                    <button class=toggle_class(true) on:click=make_on_archive_toggle(ctrl, true)>
                        "Archived"
                    </button>
                </div>
                <Show when=move || busy.get()>
                    <span class="loading">"Loading..."</span>
                </Show>
            </div>

            <Show
                when=move || ctrl.error.with(Option::is_none)
                fallback=move || {
                    view! {
                        <p class="screen-error">{move || ctrl.error.get().unwrap_or_default()}</p>
                    }
                }
            >
                <table class="resource-table">
                    <thead>
                        <tr>{headers}<th>"Actions"</th></tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
                <Show when=move || visible.with(|page| page.rows.is_empty())>
                    <p class="empty">"Nothing to show."</p>
                </Show>
                <div class="pager">
                    <button class="page-btn" on:click=move |_| step_page(-1)>"‹"</button>
                    {pager}
                    <button class="page-btn" on:click=move |_| step_page(1)>"›"</button>
                    <span class="result-count">
                        {move || format!("{} result(s)", visible.with(|page| page.filtered_count))}
                    </span>
                </div>
            </Show>

            {move || {
                modal
                    .get()
                    .map(|mode| {
                        view! {
                            <EntityModal
                                screen=screen
                                mode=mode
                                ctrl=ctrl
                                on_close=Callback::new(move |_| modal.set(None))
                            />
                        }
                    })
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_titles() {
        assert_eq!(capitalize("dish of the day"), "Dish of the day");
        assert_eq!(capitalize(""), "");
        assert_eq!(ModalMode::<()>::Add.title("product"), "Add product");
        assert_eq!(ModalMode::Edit(()).title("product"), "Edit product");
        assert_eq!(ModalMode::View(()).title("product"), "Product");
        assert!(ModalMode::View(()).is_read_only());
    }
}
