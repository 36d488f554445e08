use leptos::prelude::*;
use leptos_listview::Ref;

use super::{money, yes_no};
use crate::api::{CATEGORIES, PRODUCTS, RECIPES};
use crate::components::{create_resource_list, Column, ResourceScreen, ScreenDef};
use crate::forms::{FieldDef, FieldKind};
use crate::models::Product;

static COLUMNS: [Column<Product>; 5] = [
    Column::sortable("name", "Name", |p: &Product| p.name.clone()),
    Column::sortable("category", "Category", |p: &Product| {
        p.category.as_ref().map(Ref::label).unwrap_or_default().to_string()
    }),
    Column::sortable("recipe", "Recipe", |p: &Product| {
        p.recipe.as_ref().map(Ref::label).unwrap_or_default().to_string()
    }),
    Column::sortable("price", "Price", |p: &Product| money(p.price.value())),
    Column::sortable("visible", "Visible", |p: &Product| yes_no(p.visible)),
];

static FORM: [FieldDef; 7] = [
    FieldDef::new("name", "Name", FieldKind::Text).required().min_len(2),
    FieldDef::new("description", "Description", FieldKind::LongText),
    FieldDef::new("price", "Price", FieldKind::Number).required(),
    FieldDef::new("category", "Category", FieldKind::Reference(&CATEGORIES)),
    FieldDef::new("recipe", "Recipe", FieldKind::Reference(&RECIPES)),
    FieldDef::new("visible", "Visible", FieldKind::Checkbox),
    FieldDef::new("image", "Photo", FieldKind::Photo),
];

static SCREEN: ScreenDef<Product> = ScreenDef {
    title: "Products",
    resource: &PRODUCTS,
    columns: &COLUMNS,
    form: &FORM,
    default_sort: "name",
    row_class: None,
};

#[component]
pub fn ProductsScreen() -> impl IntoView {
    let ctrl = create_resource_list(&SCREEN);
    view! { <ResourceScreen screen=&SCREEN ctrl=ctrl /> }
}
