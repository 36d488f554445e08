use leptos::prelude::*;
use leptos_listview::Ref;

use super::optional_text;
use crate::api::{RECIPES, VARIANTS};
use crate::components::{create_resource_list, Column, ResourceScreen, ScreenDef};
use crate::forms::{FieldDef, FieldKind};
use crate::models::Variant;

static COLUMNS: [Column<Variant>; 4] = [
    Column::sortable("name", "Name", |v: &Variant| v.name.clone()),
    Column::sortable("recipe", "Recipe", |v: &Variant| {
        v.recipe.as_ref().map(Ref::label).unwrap_or_default().to_string()
    }),
    Column::sortable("rate", "Rate", |v: &Variant| v.rate.to_string()),
    Column::plain("description", "Description", |v: &Variant| optional_text(&v.description)),
];

static FORM: [FieldDef; 4] = [
    FieldDef::new("name", "Name", FieldKind::Text).required(),
    FieldDef::new("recipe", "Recipe", FieldKind::Reference(&RECIPES)).required(),
    FieldDef::new("rate", "Rate", FieldKind::Number).required(),
    FieldDef::new("description", "Description", FieldKind::LongText),
];

static SCREEN: ScreenDef<Variant> = ScreenDef {
    title: "Recipe variants",
    resource: &VARIANTS,
    columns: &COLUMNS,
    form: &FORM,
    default_sort: "name",
    row_class: None,
};

#[component]
pub fn VariantsScreen() -> impl IntoView {
    let ctrl = create_resource_list(&SCREEN);
    view! { <ResourceScreen screen=&SCREEN ctrl=ctrl /> }
}
