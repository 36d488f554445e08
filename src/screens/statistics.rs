//! Dashboard: catalog statistics and product cost/margin table, computed
//! client-side from the resource lists.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listview::RequestGeneration;

use super::money;
use crate::api::{ApiClient, ResourceApi, INGREDIENTS, MENUS, PRODUCTS, RECIPES};
use crate::context::use_app_context;
use crate::cost::{product_costs, CostRow};
use crate::error::ApiError;
use crate::models::{Ingredient, Menu, Product, Recipe};
use crate::stats::{catalog_stats, CatalogStats};

/// Ingredients at or below this stock level are flagged
const LOW_STOCK_THRESHOLD: f64 = 5.0;

#[derive(Clone, Debug, Default, PartialEq)]
struct Dashboard {
    stats: CatalogStats,
    costs: Vec<CostRow>,
}

async fn load_dashboard(api: &ApiClient) -> Result<Dashboard, ApiError> {
    let products: Vec<Product> = api.resource::<Product>(&PRODUCTS).list().await?;
    let menus: Vec<Menu> = api.resource::<Menu>(&MENUS).list().await?;
    let recipes: Vec<Recipe> = api.resource::<Recipe>(&RECIPES).list().await?;
    let ingredients: Vec<Ingredient> = api.resource::<Ingredient>(&INGREDIENTS).list().await?;

    log::debug!(
        "[Statistics] {} products, {} menus, {} recipes, {} ingredients",
        products.len(),
        menus.len(),
        recipes.len(),
        ingredients.len()
    );
    Ok(Dashboard {
        stats: catalog_stats(&products, &menus, &recipes, &ingredients, LOW_STOCK_THRESHOLD),
        costs: product_costs(&products, &recipes, &ingredients),
    })
}

#[component]
pub fn StatisticsScreen() -> impl IntoView {
    let ctx = use_app_context();
    let dashboard = RwSignal::new(None::<Dashboard>);
    let error = RwSignal::new(None::<String>);
    let generation = StoredValue::new(RequestGeneration::default());

    let reload = move |api: ApiClient| {
        let mut counter = generation.get_value();
        let ticket = counter.begin();
        generation.set_value(counter);
        spawn_local(async move {
            let result = load_dashboard(&api).await;
            if !generation.get_value().is_current(ticket) {
                log::debug!("[Statistics] dropping stale dashboard {:?}", ticket);
                return;
            }
            match result {
                Ok(loaded) => {
                    dashboard.set(Some(loaded));
                    error.set(None);
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };
    reload(ctx.api.clone());

    let api = StoredValue::new(ctx.api);
    let summary = move || {
        dashboard.with(|loaded| {
            loaded.as_ref().map(|d| {
                let s = &d.stats;
                let cards = [
                    ("Active products", s.products_active.to_string()),
                    ("Archived products", s.products_archived.to_string()),
                    ("Visible products", s.products_visible.to_string()),
                    ("Average price", money(s.average_price)),
                    ("Menus", s.menus_active.to_string()),
                    ("Recipes", s.recipes_active.to_string()),
                    ("Ingredients", s.ingredients_active.to_string()),
                ];
                cards
                    .into_iter()
                    .map(|(label, value)| {
                        view! {
                            <div class="stat-card">
                                <span class="stat-value">{value}</span>
                                <span class="stat-label">{label}</span>
                            </div>
                        }
                    })
                    .collect_view()
            })
        })
    };

    let per_category = move || {
        dashboard.with(|loaded| {
            loaded
                .iter()
                .flat_map(|d| d.stats.per_category.clone())
                .map(|(label, count)| view! { <tr><td>{label}</td><td>{count}</td></tr> })
                .collect_view()
        })
    };

    let low_stock = move || {
        dashboard.with(|loaded| {
            loaded
                .iter()
                .flat_map(|d| d.stats.low_stock.clone())
                .map(|(name, quantity, unit)| {
                    view! { <tr><td>{name}</td><td>{format!("{} {}", quantity, unit)}</td></tr> }
                })
                .collect_view()
        })
    };

    let costs = move || {
        dashboard.with(|loaded| {
            loaded
                .iter()
                .flat_map(|d| d.costs.clone())
                .map(|row| {
                    let cost = row.cost.map(money).unwrap_or_else(|| "-".to_string());
                    let margin = row.margin();
                    let margin_class =
                        if margin.is_some_and(|m| m < 0.0) { "negative" } else { "" };
                    let margin = margin.map(money).unwrap_or_else(|| "-".to_string());
                    view! {
                        <tr>
                            <td>{row.product}</td>
                            <td>{row.recipe.unwrap_or_default()}</td>
                            <td>{money(row.price)}</td>
                            <td>{cost}</td>
                            <td class=margin_class>{margin}</td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <section class="statistics-screen">
            <header class="screen-header">
                <h2>"Statistics"</h2>
                <button class="secondary-btn" on:click=move |_| reload(api.get_value())>
                    "Refresh"
                </button>
            </header>
            <Show when=move || error.with(Option::is_some)>
                <p class="screen-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <div class="stat-cards">{summary}</div>
            <div class="stat-tables">
                <table class="resource-table">
                    <thead><tr><th>"Category"</th><th>"Products"</th></tr></thead>
                    <tbody>{per_category}</tbody>
                </table>
                <table class="resource-table">
                    <thead><tr><th>"Low stock"</th><th>"Quantity"</th></tr></thead>
                    <tbody>{low_stock}</tbody>
                </table>
            </div>
            <h3>"Product costs"</h3>
            <table class="resource-table">
                <thead>
                    <tr>
                        <th>"Product"</th>
                        <th>"Recipe"</th>
                        <th>"Price"</th>
                        <th>"Cost"</th>
                        <th>"Margin"</th>
                    </tr>
                </thead>
                <tbody>{costs}</tbody>
            </table>
        </section>
    }
}
