use leptos::prelude::*;

use super::optional_text;
use crate::api::CATEGORIES;
use crate::components::{create_resource_list, Column, ResourceScreen, ScreenDef};
use crate::forms::{FieldDef, FieldKind};
use crate::models::Category;

static COLUMNS: [Column<Category>; 2] = [
    Column::sortable("label", "Label", |c: &Category| c.label.clone()),
    Column::sortable("description", "Description", |c: &Category| optional_text(&c.description)),
];

static FORM: [FieldDef; 2] = [
    FieldDef::new("label", "Label", FieldKind::Text).required().min_len(2),
    FieldDef::new("description", "Description", FieldKind::LongText),
];

static SCREEN: ScreenDef<Category> = ScreenDef {
    title: "Categories",
    resource: &CATEGORIES,
    columns: &COLUMNS,
    form: &FORM,
    default_sort: "label",
    row_class: None,
};

#[component]
pub fn CategoriesScreen() -> impl IntoView {
    let ctrl = create_resource_list(&SCREEN);
    view! { <ResourceScreen screen=&SCREEN ctrl=ctrl /> }
}
