//! Recipe Wizard Component
//!
//! Step-by-step recipe editor: basics, ingredient groups, steps, variants,
//! then a review with the estimated cost before saving.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listview::ListController;

use crate::api::{
    list_options, ResourceApi, SelectOption, CATEGORIES, INGREDIENTS, RECIPES, USTENSILES, VARIANTS,
};
use crate::context::use_app_context;
use crate::cost::{cost_per_portion, draft_cost};
use crate::error::MutationFailure;
use crate::markdown::render_markdown_inline;
use crate::models::{Ingredient, Recipe, Variant};
use crate::store::{store_notify_error, store_notify_success, use_app_store};
use crate::wizard::{variant_summary, LineDraft, RecipeDraft, RecipeWizard, WizardStep};

fn edit_draft(wizard: RwSignal<RecipeWizard>, f: impl FnOnce(&mut RecipeDraft)) {
    wizard.update(|w| f(&mut w.draft));
}

/// Click handler applying one draft edit
fn click_edit(
    wizard: RwSignal<RecipeWizard>,
    f: impl Fn(&mut RecipeDraft) + Copy + 'static,
) -> impl Fn(leptos::ev::MouseEvent) + Copy + 'static {
    move |_| edit_draft(wizard, f)
}

#[component]
pub fn RecipeWizardModal(
    initial: RecipeDraft,
    ctrl: ListController<Recipe>,
    on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let wizard = RwSignal::new(RecipeWizard::new(initial));
    let step = Memo::new(move |_| wizard.with(|w| w.step));
    let saving = RwSignal::new(false);

    let ingredients = RwSignal::new(Vec::<Ingredient>::new());
    let categories = RwSignal::new(Vec::<SelectOption>::new());
    let ustensiles = RwSignal::new(Vec::<SelectOption>::new());

    // ========================
    // Reference Data
    // ========================
    {
        let api = ctx.api.clone();
        spawn_local(async move {
            match api.resource::<Ingredient>(&INGREDIENTS).list().await {
                Ok(mut list) => {
                    list.retain(|ingredient| !ingredient.archived);
                    list.sort_by_key(|ingredient| ingredient.name.to_lowercase());
                    ingredients.set(list);
                }
                Err(err) => {
                    store_notify_error(&store, format!("Could not load ingredients: {}", err));
                }
            }
            match list_options(&api, &CATEGORIES).await {
                Ok(options) => categories.set(options),
                Err(err) => log::warn!("[RecipeWizard] categories: {}", err),
            }
            match list_options(&api, &USTENSILES).await {
                Ok(options) => ustensiles.set(options),
                Err(err) => log::warn!("[RecipeWizard] ustensiles: {}", err),
            }
        });
    }

    // ========================
    // Save
    // ========================
    let on_save = {
        let api = ctx.api.clone();
        move |_: leptos::ev::MouseEvent| {
            if saving.get_untracked() {
                return;
            }
            let draft = wizard.with_untracked(|w| w.draft.clone());
            let problems = draft.validate_step(WizardStep::Review);
            if !problems.is_empty() {
                wizard.update(|w| w.errors = problems);
                return;
            }
            saving.set(true);
            let recipes = api.resource::<Recipe>(&RECIPES);
            let variants = api.resource::<Variant>(&VARIANTS);
            let ticket = ctrl.begin_fetch();
            spawn_local(async move {
                let payload = draft.to_payload();
                let saved = match &draft.id {
                    Some(id) => recipes.update(id, &payload, None).await,
                    None => recipes.create(&payload, None).await,
                };
                let saved = match saved {
                    Ok(saved) => saved,
                    Err(err) => {
                        ctrl.abandon_fetch(ticket);
                        saving.set(false);
                        store_notify_error(&store, err.to_string());
                        return;
                    }
                };

                let mut variant_errors = Vec::new();
                match draft.id.clone().or_else(|| saved.map(|recipe| recipe.id)) {
                    Some(recipe_id) => {
                        for variant in draft.variant_payloads(&recipe_id) {
                            if let Err(err) = variants.create(&variant, None).await {
                                log::warn!("[RecipeWizard] variant create failed: {}", err);
                                variant_errors.push(err.to_string());
                            }
                        }
                    }
                    None if !draft.variants.is_empty() => {
                        log::warn!("[RecipeWizard] created recipe has no id; variants skipped");
                    }
                    None => {}
                }

                let refreshed = recipes
                    .list()
                    .await
                    .map_err(|err| MutationFailure::RefreshFailed(err).to_string());
                ctrl.finish_fetch(ticket, refreshed);
                saving.set(false);
                match variant_summary(draft.id.is_some(), &variant_errors) {
                    Ok(message) => store_notify_success(&store, message),
                    Err(message) => store_notify_error(&store, message),
                };
                on_close.run(());
            });
        }
    };

    let title = wizard.with_untracked(|w| if w.is_edit() { "Edit recipe" } else { "New recipe" });

    let step_tabs = WizardStep::ALL
        .into_iter()
        .map(|s| {
            let class = move || {
                let current = step.get();
                if current == s {
                    "wizard-tab active"
                } else if s.index() < current.index() {
                    "wizard-tab done"
                } else {
                    "wizard-tab"
                }
            };
            view! { <li class=class>{format!("{}. {}", s.index() + 1, s.title())}</li> }
        })
        .collect_view();

    let body = move || match step.get() {
        WizardStep::Basics => basics_step(wizard, categories, ustensiles).into_any(),
        WizardStep::Ingredients => ingredients_step(wizard, ingredients).into_any(),
        WizardStep::Steps => steps_step(wizard).into_any(),
        WizardStep::Variants => variants_step(wizard).into_any(),
        WizardStep::Review => review_step(wizard, ingredients).into_any(),
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal modal-wide">
                <h3>{title}</h3>
                <ol class="wizard-steps">{step_tabs}</ol>
                <div class="wizard-body">{body}</div>
                <ul class="wizard-errors">
                    {move || {
                        wizard
                            .with(|w| w.errors.clone())
                            .into_iter()
                            .map(|message| view! { <li class="field-error">{message}</li> })
                            .collect_view()
                    }}
                </ul>
                <div class="modal-actions">
                    <button type="button" class="secondary-btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="secondary-btn"
                        disabled=move || step.get() == WizardStep::Basics
                        on:click=move |_| {
                            wizard.update(|w| {
                                w.back();
                            });
                        }
                    >
                        "Back"
                    </button>
                    <Show
                        when=move || step.get() == WizardStep::Review
                        fallback=move || {
                            view! {
                                <button
                                    type="button"
                                    class="primary-btn"
                                    on:click=move |_| {
                                        wizard.update(|w| {
                                            w.next();
                                        });
                                    }
                                >
                                    "Next"
                                </button>
                            }
                        }
                    >
                        <button
                            type="button"
                            class="primary-btn"
                            disabled=move || saving.get()
                            on:click=on_save.clone()
                        >
                            "Save recipe"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}

// ========================
// Steps
// ========================

fn basics_step(
    wizard: RwSignal<RecipeWizard>,
    categories: RwSignal<Vec<SelectOption>>,
    ustensiles: RwSignal<Vec<SelectOption>>,
) -> impl IntoView {
    let category_options = move || {
        let selected = wizard.with_untracked(|w| w.draft.category_id.clone());
        categories
            .get()
            .into_iter()
            .map(|option| {
                let is_selected = option.id == selected;
                view! { <option value=option.id selected=is_selected>{option.label}</option> }
            })
            .collect_view()
    };
    let ustensile_boxes = move || {
        ustensiles
            .get()
            .into_iter()
            .map(|option| {
                let id = option.id.clone();
                let checked_id = option.id;
                view! {
                    <label class="check-option">
                        <input
                            type="checkbox"
                            prop:checked=move || {
                                wizard.with(|w| w.draft.ustensile_ids.contains(&checked_id))
                            }
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                let id = id.clone();
                                edit_draft(wizard, |d| {
                                    d.ustensile_ids.retain(|existing| *existing != id);
                                    if checked {
                                        d.ustensile_ids.push(id);
                                    }
                                });
                            }
                        />
                        {option.label}
                    </label>
                }
            })
            .collect_view()
    };

    view! {
        <label class="form-field">
            <span class="form-label">"Name *"</span>
            <input
                type="text"
                prop:value=move || wizard.with(|w| w.draft.name.clone())
                on:input=move |ev| edit_draft(wizard, |d| d.name = event_target_value(&ev))
            />
        </label>
        <label class="form-field">
            <span class="form-label">"Description"</span>
            <textarea
                rows="3"
                prop:value=move || wizard.with(|w| w.draft.description.clone())
                on:input=move |ev| edit_draft(wizard, |d| d.description = event_target_value(&ev))
            ></textarea>
        </label>
        <label class="form-field">
            <span class="form-label">"Category"</span>
            <select
                prop:value=move || wizard.with(|w| w.draft.category_id.clone())
                on:change=move |ev| edit_draft(wizard, |d| d.category_id = event_target_value(&ev))
            >
                <option value="">"None"</option>
                {category_options}
            </select>
        </label>
        <label class="form-field">
            <span class="form-label">"Portions *"</span>
            <input
                type="number"
                min="1"
                prop:value=move || wizard.with(|w| w.draft.portions.clone())
                on:input=move |ev| edit_draft(wizard, |d| d.portions = event_target_value(&ev))
            />
        </label>
        <fieldset class="form-field">
            <legend>"Ustensiles"</legend>
            {ustensile_boxes}
        </fieldset>
    }
}

fn ingredients_step(
    wizard: RwSignal<RecipeWizard>,
    ingredients: RwSignal<Vec<Ingredient>>,
) -> impl IntoView {
    // Re-render only when groups or lines are added or removed, so inputs keep focus
    let shape = Memo::new(move |_| {
        wizard.with(|w| w.draft.groups.iter().map(|g| g.lines.len()).collect::<Vec<_>>())
    });

    let line_row = move |g: usize, l: usize| {
        let read = move |f: fn(&LineDraft) -> String| {
            move || wizard.with(|w| w.draft.line(g, l).map(f).unwrap_or_default())
        };
        let edit = move |f: fn(&mut LineDraft, String)| {
            move |ev: leptos::ev::Event| {
                let value = event_target_value(&ev);
                edit_draft(wizard, |d| {
                    if let Some(line) = d.line_mut(g, l) {
                        f(line, value);
                    }
                });
            }
        };
        let ingredient_options = move || {
            let selected = wizard.with_untracked(|w| {
                w.draft.line(g, l).map(|line| line.ingredient_id.clone())
            });
            ingredients
                .get()
                .into_iter()
                .map(|ingredient| {
                    let is_selected = selected.as_deref() == Some(ingredient.id.as_str());
                    view! {
                        <option value=ingredient.id selected=is_selected>
                            {format!("{} ({})", ingredient.name, ingredient.unit)}
                        </option>
                    }
                })
                .collect_view()
        };
        view! {
            <div class="wizard-line">
                <select
                    prop:value=read(|line| line.ingredient_id.clone())
                    on:change=edit(|line, v| line.ingredient_id = v)
                >
                    <option value="">"Ingredient..."</option>
                    {ingredient_options}
                </select>
                <input
                    type="number"
                    min="0"
                    step="any"
                    placeholder="Qty"
                    prop:value=read(|line| line.quantity.clone())
                    on:input=edit(|line, v| line.quantity = v)
                />
                <input
                    type="text"
                    placeholder="Unit"
                    prop:value=read(|line| line.unit.clone())
                    on:input=edit(|line, v| line.unit = v)
                />
                <button
                    type="button"
                    class="row-btn"
                    on:click=click_edit(wizard, move |d| d.remove_line(g, l))
                >
                    "×"
                </button>
            </div>
        }
    };

    let groups = move || {
        shape
            .get()
            .into_iter()
            .enumerate()
            .map(|(g, line_count)| {
                view! {
                    <fieldset class="wizard-group">
                        <input
                            type="text"
                            placeholder="Group title"
                            prop:value=move || {
                                wizard.with(|w| {
                                    let group = w.draft.groups.get(g);
                                    group.map(|group| group.title.clone()).unwrap_or_default()
                                })
                            }
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                edit_draft(wizard, |d| {
                                    if let Some(group) = d.groups.get_mut(g) {
                                        group.title = value;
                                    }
                                });
                            }
                        />
                        {(0..line_count).map(|l| line_row(g, l)).collect_view()}
                        <button
                            type="button"
                            class="row-btn"
                            on:click=click_edit(wizard, move |d| d.add_line(g))
                        >
                            "+ Ingredient"
                        </button>
                        <button
                            type="button"
                            class="row-btn danger"
                            on:click=click_edit(wizard, move |d| d.remove_group(g))
                        >
                            "Remove group"
                        </button>
                    </fieldset>
                }
            })
            .collect_view()
    };

    view! {
        {groups}
        <button
            type="button"
            class="secondary-btn"
            on:click=click_edit(wizard, RecipeDraft::add_group)
        >
            "+ Group"
        </button>
    }
}

fn steps_step(wizard: RwSignal<RecipeWizard>) -> impl IntoView {
    let count = Memo::new(move |_| wizard.with(|w| w.draft.steps.len()));

    let rows = move || {
        (0..count.get())
            .map(|i| {
                view! {
                    <div class="wizard-line">
                        <span class="step-number">{i + 1}</span>
                        <textarea
                            rows="2"
                            prop:value=move || {
                                wizard.with(|w| w.draft.steps.get(i).cloned().unwrap_or_default())
                            }
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                edit_draft(wizard, |d| {
                                    if let Some(step) = d.steps.get_mut(i) {
                                        *step = value;
                                    }
                                });
                            }
                        ></textarea>
                        <button
                            type="button"
                            class="row-btn"
                            on:click=click_edit(wizard, move |d| d.move_step(i, true))
                        >
                            "↑"
                        </button>
                        <button
                            type="button"
                            class="row-btn"
                            on:click=click_edit(wizard, move |d| d.move_step(i, false))
                        >
                            "↓"
                        </button>
                        <button
                            type="button"
                            class="row-btn"
                            on:click=click_edit(wizard, move |d| d.remove_step(i))
                        >
                            "×"
                        </button>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <p class="hint">"Steps accept Markdown."</p>
        {rows}
        <button
            type="button"
            class="secondary-btn"
            on:click=click_edit(wizard, RecipeDraft::add_step)
        >
            "+ Step"
        </button>
    }
}

fn variants_step(wizard: RwSignal<RecipeWizard>) -> impl IntoView {
    let count = Memo::new(move |_| wizard.with(|w| w.draft.variants.len()));

    let rows = move || {
        (0..count.get())
            .map(|i| {
                view! {
                    <div class="wizard-line">
                        <input
                            type="text"
                            placeholder="Variant name"
                            prop:value=move || {
                                wizard.with(|w| {
                                    let variant = w.draft.variants.get(i);
                                    variant.map(|v| v.name.clone()).unwrap_or_default()
                                })
                            }
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                edit_draft(wizard, |d| {
                                    if let Some(variant) = d.variants.get_mut(i) {
                                        variant.name = value;
                                    }
                                });
                            }
                        />
                        <input
                            type="number"
                            min="0"
                            step="any"
                            placeholder="Rate"
                            prop:value=move || {
                                wizard.with(|w| {
                                    let variant = w.draft.variants.get(i);
                                    variant.map(|v| v.rate.clone()).unwrap_or_default()
                                })
                            }
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                edit_draft(wizard, |d| {
                                    if let Some(variant) = d.variants.get_mut(i) {
                                        variant.rate = value;
                                    }
                                });
                            }
                        />
                        <button
                            type="button"
                            class="row-btn"
                            on:click=click_edit(wizard, move |d| d.remove_variant(i))
                        >
                            "×"
                        </button>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <p class="hint">"Optional. Variants are created after the recipe is saved."</p>
        {rows}
        <button
            type="button"
            class="secondary-btn"
            on:click=click_edit(wizard, RecipeDraft::add_variant)
        >
            "+ Variant"
        </button>
    }
}

fn review_step(
    wizard: RwSignal<RecipeWizard>,
    ingredients: RwSignal<Vec<Ingredient>>,
) -> impl IntoView {
    let cost = move || {
        wizard.with(|w| {
            ingredients.with(|list| {
                let total = draft_cost(&w.draft, list);
                let portions = w.draft.portions.trim().parse::<f64>().unwrap_or(1.0);
                (total, cost_per_portion(total, portions))
            })
        })
    };
    let steps = move || {
        wizard
            .with(|w| w.draft.steps.clone())
            .into_iter()
            .map(|text| view! { <li inner_html=render_markdown_inline(&text)></li> })
            .collect_view()
    };
    let payload = move || {
        wizard.with(|w| serde_json::to_string_pretty(&w.draft.to_payload()).unwrap_or_default())
    };

    view! {
        <h4>{move || wizard.with(|w| w.draft.name.clone())}</h4>
        <p class="cost">
            {move || {
                let (total, per_portion) = cost();
                format!("Estimated cost: {:.2} ({:.2} per portion)", total, per_portion)
            }}
        </p>
        <ol class="recipe-steps">{steps}</ol>
        <details>
            <summary>"Payload"</summary>
            <pre>{payload}</pre>
        </details>
    }
}
