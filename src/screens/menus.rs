use leptos::prelude::*;
use leptos_listview::Ref;

use super::{money, optional_text, yes_no};
use crate::api::{MENUS, PRODUCTS};
use crate::components::{create_resource_list, Column, ResourceScreen, ScreenDef};
use crate::forms::{FieldDef, FieldKind};
use crate::models::Menu;

fn product_names(menu: &Menu) -> String {
    menu.products
        .iter()
        .map(Ref::label)
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

static COLUMNS: [Column<Menu>; 5] = [
    Column::sortable("name", "Name", |m: &Menu| m.name.clone()),
    Column::plain("description", "Description", |m: &Menu| optional_text(&m.description)),
    Column::sortable("price", "Price", |m: &Menu| money(m.price.value())),
    Column::sortable("products", "Products", |m: &Menu| {
        format!("{} ({})", m.products.len(), product_names(m))
    }),
    Column::sortable("visible", "Visible", |m: &Menu| yes_no(m.visible)),
];

static FORM: [FieldDef; 6] = [
    FieldDef::new("name", "Name", FieldKind::Text).required().min_len(2),
    FieldDef::new("description", "Description", FieldKind::LongText),
    FieldDef::new("price", "Price", FieldKind::Number).required(),
    FieldDef::new("products", "Products", FieldKind::References(&PRODUCTS)),
    FieldDef::new("visible", "Visible", FieldKind::Checkbox),
    FieldDef::new("image", "Photo", FieldKind::Photo),
];

static SCREEN: ScreenDef<Menu> = ScreenDef {
    title: "Menus",
    resource: &MENUS,
    columns: &COLUMNS,
    form: &FORM,
    default_sort: "name",
    row_class: None,
};

#[component]
pub fn MenusScreen() -> impl IntoView {
    let ctrl = create_resource_list(&SCREEN);
    view! { <ResourceScreen screen=&SCREEN ctrl=ctrl /> }
}
