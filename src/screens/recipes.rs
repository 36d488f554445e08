//! Recipes list. Add and Edit open the step-by-step wizard instead of the
//! plain entity form.

use leptos::prelude::*;
use leptos_listview::Ref;

use crate::api::{CATEGORIES, RECIPES};
use crate::components::{create_resource_list, Column, RecipeWizardModal, ResourceScreen, ScreenDef};
use crate::forms::{FieldDef, FieldKind};
use crate::models::Recipe;
use crate::wizard::RecipeDraft;

fn ingredient_count(recipe: &Recipe) -> usize {
    recipe.ingredient_groups.iter().map(|group| group.items.len()).sum()
}

static COLUMNS: [Column<Recipe>; 5] = [
    Column::sortable("name", "Name", |r: &Recipe| r.name.clone()),
    Column::sortable("category", "Category", |r: &Recipe| {
        r.category.as_ref().map(Ref::label).unwrap_or_default().to_string()
    }),
    Column::sortable("portions", "Portions", |r: &Recipe| r.portions.to_string()),
    Column::plain("ingredients", "Ingredients", |r: &Recipe| ingredient_count(r).to_string()),
    Column::sortable("steps", "Steps", |r: &Recipe| r.steps.len().to_string()),
];

/// Read-only view; editing goes through the wizard
static FORM: [FieldDef; 4] = [
    FieldDef::new("name", "Name", FieldKind::Text).required(),
    FieldDef::new("description", "Description", FieldKind::LongText),
    FieldDef::new("category", "Category", FieldKind::Reference(&CATEGORIES)),
    FieldDef::new("portions", "Portions", FieldKind::Number),
];

static SCREEN: ScreenDef<Recipe> = ScreenDef {
    title: "Recipes",
    resource: &RECIPES,
    columns: &COLUMNS,
    form: &FORM,
    default_sort: "name",
    row_class: None,
};

#[component]
pub fn RecipesScreen() -> impl IntoView {
    let ctrl = create_resource_list(&SCREEN);
    let editing = RwSignal::new(None::<RecipeDraft>);

    let on_edit = Callback::new(move |recipe: Option<Recipe>| {
        let draft = recipe.as_ref().map(RecipeDraft::from_recipe).unwrap_or_default();
        editing.set(Some(draft));
    });

    view! {
        <ResourceScreen screen=&SCREEN ctrl=ctrl on_edit=on_edit />
        {move || {
            editing
                .get()
                .map(|draft| {
                    view! {
                        <RecipeWizardModal
                            initial=draft
                            ctrl=ctrl
                            on_close=Callback::new(move |_| editing.set(None))
                        />
                    }
                })
        }}
    }
}
