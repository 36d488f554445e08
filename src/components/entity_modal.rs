//! Entity Modal Component
//!
//! Add/Edit/View dialog for one entity. Edits a JSON working copy laid out
//! by the screen's form schema, validates it, then sends it through the
//! screen's ListController so the list refetches after a save.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listview::{Entity, ListController};
use serde_json::Value;

use crate::api::{list_options, read_photo, Mutation, Photo, SelectOption};
use crate::components::resource_table::{run_mutation, ModalMode, ScreenDef, ScreenEntity};
use crate::context::use_app_context;
use crate::forms::{
    display_value, draft_from, empty_draft, is_checked, selected_ids, set_selected, to_payload,
    validate, Draft, FieldDef, FieldError, FieldKind,
};
use crate::store::{store_notify_error, use_app_store};

#[component]
pub fn EntityModal<T>(
    screen: &'static ScreenDef<T>,
    mode: ModalMode<T>,
    ctrl: ListController<T>,
    on_close: Callback<()>,
) -> impl IntoView
where
    T: ScreenEntity,
{
    let ctx = use_app_context();
    let store = use_app_store();
    let title = mode.title(screen.resource.name);
    let read_only = mode.is_read_only();

    let draft = RwSignal::new(match &mode {
        ModalMode::Add => empty_draft(screen.form),
        ModalMode::Edit(item) | ModalMode::View(item) => draft_from(item),
    });
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let photo = RwSignal::new(None::<Photo>);
    let options = RwSignal::new(HashMap::<&'static str, Vec<SelectOption>>::new());
    let mode = StoredValue::new(mode);

    // Reference selects
    for field in screen.form {
        if let FieldKind::Reference(def) | FieldKind::References(def) = field.kind {
            let api = ctx.api.clone();
            let key = field.key;
            spawn_local(async move {
                match list_options(&api, def).await {
                    Ok(loaded) => options.update(|map| {
                        map.insert(key, loaded);
                    }),
                    Err(err) => {
                        log::warn!("[EntityModal] options for {} failed: {}", def.path, err);
                        let message = format!("Could not load {} options: {}", def.name, err);
                        store_notify_error(&store, message);
                    }
                }
            });
        }
    }

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if read_only || ctrl.loading.get_untracked() {
            return;
        }
        let found = draft.with_untracked(|d| validate(screen.form, d));
        if !found.is_empty() {
            log::debug!("[EntityModal] {} field(s) invalid", found.len());
            errors.set(found);
            return;
        }
        errors.set(Vec::new());

        let payload = draft.with_untracked(|d| to_payload(screen.form, d));
        let photo = photo.get_untracked();
        let mutation = mode.with_value(|mode| match mode {
            ModalMode::Edit(item) => Mutation::Update {
                id: item.id().to_string(),
                payload,
                photo,
            },
            _ => Mutation::Create { payload, photo },
        });
        let api = ctx.api.resource::<T>(screen.resource);
        run_mutation(ctrl, api, mutation, store, move || on_close.run(()));
    };

    let fields = screen
        .form
        .iter()
        .map(|field| {
            let field = *field;
            let error = move || {
                errors.with(|all| {
                    all.iter()
                        .find(|e| e.key == field.key)
                        .map(|e| view! { <span class="field-error">{e.message.clone()}</span> })
                })
            };
            let input = if read_only {
                read_only_value(field, draft, options).into_any()
            } else {
                field_input(field, draft, options, photo).into_any()
            };
            view! {
                <label class="form-field">
                    <span class="form-label">
                        {field.label}
                        {field.required.then_some(" *")}
                    </span>
                    {input}
                    {error}
                </label>
            }
        })
        .collect_view();

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <h3>{title}</h3>
                <form on:submit=on_submit>
                    {fields}
                    <div class="modal-actions">
                        <button
                            type="button"
                            class="secondary-btn"
                            on:click=move |_| on_close.run(())
                        >
                            {if read_only { "Close" } else { "Cancel" }}
                        </button>
                        <Show when=move || !read_only>
                            <button
                                type="submit"
                                class="primary-btn"
                                disabled=move || ctrl.loading.get()
                            >
                                "Save"
                            </button>
                        </Show>
                    </div>
                </form>
            </div>
        </div>
    }
}

fn set_text(draft: RwSignal<Draft>, key: &'static str, value: String) {
    draft.update(|d| {
        d.insert(key.to_string(), Value::String(value));
    });
}

fn is_selected(draft: RwSignal<Draft>, key: &'static str, id: &str) -> bool {
    draft.with(|d| selected_ids(d, key).iter().any(|selected| selected == id))
}

/// Input/change handler writing the target's value under `key`
fn text_handler(
    draft: RwSignal<Draft>,
    key: &'static str,
) -> impl Fn(leptos::ev::Event) + Copy + 'static {
    move |ev| set_text(draft, key, event_target_value(&ev))
}

fn field_input(
    field: FieldDef,
    draft: RwSignal<Draft>,
    options: RwSignal<HashMap<&'static str, Vec<SelectOption>>>,
    photo: RwSignal<Option<Photo>>,
) -> impl IntoView {
    let key = field.key;
    let value = move || draft.with(|d| display_value(d, key));

    match field.kind {
        FieldKind::Text => view! {
            <input type="text" prop:value=value on:input=text_handler(draft, key) />
        }
        .into_any(),
        FieldKind::LongText => view! {
            <textarea rows="3" prop:value=value on:input=text_handler(draft, key)></textarea>
        }
        .into_any(),
        FieldKind::Number => view! {
            <input
                type="number"
                min="0"
                step="any"
                prop:value=value
                on:input=text_handler(draft, key)
            />
        }
        .into_any(),
        FieldKind::Date => view! {
            <input type="date" prop:value=value on:input=text_handler(draft, key) />
        }
        .into_any(),
        FieldKind::Checkbox => view! {
            <input
                type="checkbox"
                prop:checked=move || draft.with(|d| is_checked(d, key))
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    draft.update(|d| {
                        d.insert(key.to_string(), Value::Bool(checked));
                    });
                }
            />
        }
        .into_any(),
        FieldKind::Reference(_) => view! {
            <select prop:value=value on:change=text_handler(draft, key)>
                <option value="">"None"</option>
                {move || {
                    options
                        .with(|map| map.get(key).cloned().unwrap_or_default())
                        .into_iter()
                        .map(|option| {
                            let current = draft.with_untracked(|d| display_value(d, key));
                            let selected = current == option.id;
                            view! {
                                <option value=option.id selected=selected>
                                    {option.label}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        }
        .into_any(),
        FieldKind::References(_) => view! {
            <div class="check-options">
                {move || {
                    options
                        .with(|map| map.get(key).cloned().unwrap_or_default())
                        .into_iter()
                        .map(|option| {
                            let id = option.id.clone();
                            let checked_id = option.id;
                            view! {
                                <label class="check-option">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || is_selected(draft, key, &checked_id)
                                        on:change=move |ev| {
                                            let checked = event_target_checked(&ev);
                                            draft.update(|d| set_selected(d, key, &id, checked));
                                        }
                                    />
                                    {option.label}
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </div>
        }
        .into_any(),
        FieldKind::Role => view! {
            <select prop:value=value on:change=text_handler(draft, key)>
                <option value="user">"User"</option>
                <option value="admin">"Admin"</option>
            </select>
        }
        .into_any(),
        FieldKind::Photo => {
            let store = use_app_store();
            view! {
                <input
                    type="file"
                    accept="image/*"
                    on:change=move |ev| {
                        let input: web_sys::HtmlInputElement = event_target(&ev);
                        let Some(file) = input.files().and_then(|files| files.get(0)) else {
                            photo.set(None);
                            return;
                        };
                        spawn_local(async move {
                            match read_photo(file).await {
                                Ok(loaded) => photo.set(Some(loaded)),
                                Err(err) => {
                                    let message = format!("Could not read photo: {}", err);
                                    store_notify_error(&store, message);
                                }
                            }
                        });
                    }
                />
            }
            .into_any()
        }
    }
}

fn read_only_value(
    field: FieldDef,
    draft: RwSignal<Draft>,
    options: RwSignal<HashMap<&'static str, Vec<SelectOption>>>,
) -> impl IntoView {
    let key = field.key;
    let text = move || {
        let raw = draft.with(|d| display_value(d, key));
        match field.kind {
            FieldKind::Checkbox => {
                let checked = draft.with(|d| is_checked(d, key));
                (if checked { "Yes" } else { "No" }).to_string()
            }
            FieldKind::Reference(_) => options.with(|map| {
                map.get(key)
                    .and_then(|list| list.iter().find(|option| option.id == raw))
                    .map(|option| option.label.clone())
                    .unwrap_or(raw)
            }),
            FieldKind::References(_) => {
                let ids = draft.with(|d| selected_ids(d, key));
                options.with(|map| {
                    let known = map.get(key);
                    ids.iter()
                        .map(|id| {
                            known
                                .and_then(|list| list.iter().find(|option| option.id == *id))
                                .map_or_else(|| id.clone(), |option| option.label.clone())
                        })
                        .collect::<Vec<_>>()
                        .join(", ")
                })
            }
            _ => raw,
        }
    };
    view! { <span class="form-value">{text}</span> }
}
