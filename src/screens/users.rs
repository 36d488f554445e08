use leptos::prelude::*;

use crate::api::USERS;
use crate::components::{create_resource_list, Column, ResourceScreen, ScreenDef};
use crate::forms::{FieldDef, FieldKind};
use crate::models::User;

static COLUMNS: [Column<User>; 3] = [
    Column::sortable("name", "Name", |u: &User| u.name.clone()),
    Column::sortable("email", "Email", |u: &User| u.email.clone()),
    Column::sortable("role", "Role", |u: &User| u.role.as_str().to_string()),
];

static FORM: [FieldDef; 3] = [
    FieldDef::new("name", "Name", FieldKind::Text).required().min_len(2),
    FieldDef::new("email", "Email", FieldKind::Text).required().min_len(3),
    FieldDef::new("role", "Role", FieldKind::Role).required(),
];

static SCREEN: ScreenDef<User> = ScreenDef {
    title: "Users",
    resource: &USERS,
    columns: &COLUMNS,
    form: &FORM,
    default_sort: "name",
    row_class: None,
};

#[component]
pub fn UsersScreen() -> impl IntoView {
    let ctrl = create_resource_list(&SCREEN);
    view! { <ResourceScreen screen=&SCREEN ctrl=ctrl /> }
}
