use leptos::prelude::*;

use super::optional_text;
use crate::api::USTENSILES;
use crate::components::{create_resource_list, Column, ResourceScreen, ScreenDef};
use crate::forms::{FieldDef, FieldKind};
use crate::models::Ustensile;

static COLUMNS: [Column<Ustensile>; 3] = [
    Column::sortable("name", "Name", |u: &Ustensile| u.name.clone()),
    Column::sortable("quantity", "Quantity", |u: &Ustensile| u.quantity.to_string()),
    Column::plain("description", "Description", |u: &Ustensile| optional_text(&u.description)),
];

static FORM: [FieldDef; 4] = [
    FieldDef::new("name", "Name", FieldKind::Text).required(),
    FieldDef::new("quantity", "Quantity", FieldKind::Number).required(),
    FieldDef::new("description", "Description", FieldKind::LongText),
    FieldDef::new("image", "Photo", FieldKind::Photo),
];

static SCREEN: ScreenDef<Ustensile> = ScreenDef {
    title: "Ustensiles",
    resource: &USTENSILES,
    columns: &COLUMNS,
    form: &FORM,
    default_sort: "name",
    row_class: None,
};

#[component]
pub fn UstensilesScreen() -> impl IntoView {
    let ctrl = create_resource_list(&SCREEN);
    view! { <ResourceScreen screen=&SCREEN ctrl=ctrl /> }
}
