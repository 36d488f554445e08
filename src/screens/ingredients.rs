use leptos::prelude::*;

use super::money;
use crate::api::INGREDIENTS;
use crate::components::{create_resource_list, Column, ResourceScreen, ScreenDef};
use crate::forms::{FieldDef, FieldKind};
use crate::models::Ingredient;

static COLUMNS: [Column<Ingredient>; 4] = [
    Column::sortable("name", "Name", |i: &Ingredient| i.name.clone()),
    Column::sortable("unit", "Unit", |i: &Ingredient| i.unit.clone()),
    Column::sortable("quantity", "Stock", |i: &Ingredient| i.quantity.to_string()),
    Column::sortable("unitPrice", "Unit price", |i: &Ingredient| money(i.unit_price.value())),
];

static FORM: [FieldDef; 4] = [
    FieldDef::new("name", "Name", FieldKind::Text).required().min_len(2),
    FieldDef::new("unit", "Unit", FieldKind::Text).required().min_len(1),
    FieldDef::new("quantity", "Stock", FieldKind::Number).required(),
    FieldDef::new("unitPrice", "Unit price", FieldKind::Number).required(),
];

static SCREEN: ScreenDef<Ingredient> = ScreenDef {
    title: "Ingredients",
    resource: &INGREDIENTS,
    columns: &COLUMNS,
    form: &FORM,
    default_sort: "name",
    row_class: None,
};

#[component]
pub fn IngredientsScreen() -> impl IntoView {
    let ctrl = create_resource_list(&SCREEN);
    view! { <ResourceScreen screen=&SCREEN ctrl=ctrl /> }
}
