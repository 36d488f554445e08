//! Dish of the day scheduling. Today's entry is highlighted and the next
//! scheduled dishes are listed above the table.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos_listview::Ref;

use super::optional_text;
use crate::api::{DISHES_OF_DAY, PRODUCTS};
use crate::components::{create_resource_list, Column, ResourceScreen, ScreenDef};
use crate::forms::{FieldDef, FieldKind};
use crate::models::{upcoming, DishOfDay};

/// How many upcoming dishes the summary shows
const UPCOMING_SHOWN: usize = 7;

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn product_label(dish: &DishOfDay) -> String {
    dish.product.as_ref().map(Ref::label).unwrap_or_default().to_string()
}

fn row_class(dish: &DishOfDay) -> &'static str {
    if dish.is_on(today()) {
        "row-today"
    } else {
        ""
    }
}

static COLUMNS: [Column<DishOfDay>; 3] = [
    Column::sortable("date", "Date", |d: &DishOfDay| d.day_text()),
    Column::sortable("product", "Product", product_label),
    Column::plain("note", "Note", |d: &DishOfDay| optional_text(&d.note)),
];

static FORM: [FieldDef; 3] = [
    FieldDef::new("date", "Date", FieldKind::Date).required(),
    FieldDef::new("product", "Product", FieldKind::Reference(&PRODUCTS)).required(),
    FieldDef::new("note", "Note", FieldKind::LongText),
];

static SCREEN: ScreenDef<DishOfDay> = ScreenDef {
    title: "Dish of the day",
    resource: &DISHES_OF_DAY,
    columns: &COLUMNS,
    form: &FORM,
    default_sort: "date",
    row_class: Some(row_class as fn(&DishOfDay) -> &'static str),
};

#[component]
pub fn DishOfDayScreen() -> impl IntoView {
    let ctrl = create_resource_list(&SCREEN);

    let next_dishes = move || {
        let today = today();
        ctrl.items.with(|items| {
            upcoming(items, today)
                .into_iter()
                .take(UPCOMING_SHOWN)
                .map(|dish| {
                    let class = if dish.is_on(today) { "upcoming today" } else { "upcoming" };
                    let day = dish
                        .date
                        .map(|d| d.format("%a %d %b").to_string())
                        .unwrap_or_default();
                    let text = format!("{} · {}", day, product_label(dish));
                    view! { <li class=class>{text}</li> }
                })
                .collect_view()
        })
    };

    view! {
        <aside class="upcoming-panel">
            <h3>"Coming up"</h3>
            <ul>{next_dishes}</ul>
        </aside>
        <ResourceScreen screen=&SCREEN ctrl=ctrl />
    }
}
