//! Menu Admin App
//!
//! Root component: builds the shared services, then shows the nav bar,
//! the notice banner and the open screen.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{NavBar, NoticeBanner};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::screens::{
    CategoriesScreen, DishOfDayScreen, IngredientsScreen, MenusScreen, ProductsScreen,
    RecipesScreen, StatisticsScreen, UsersScreen, UstensilesScreen, VariantsScreen,
};
use crate::store::{AppState, AppStateStoreFields, Screen};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // Provide context to all children
    provide_context(AppContext::new(config));
    let store = Store::new(AppState::default());
    provide_context(store);

    // Each switch mounts a fresh screen, which fetches its list again
    let current = move || match store.screen().get() {
        Screen::Statistics => view! { <StatisticsScreen /> }.into_any(),
        Screen::Menus => view! { <MenusScreen /> }.into_any(),
        Screen::Categories => view! { <CategoriesScreen /> }.into_any(),
        Screen::Products => view! { <ProductsScreen /> }.into_any(),
        Screen::Recipes => view! { <RecipesScreen /> }.into_any(),
        Screen::Variants => view! { <VariantsScreen /> }.into_any(),
        Screen::Ingredients => view! { <IngredientsScreen /> }.into_any(),
        Screen::Ustensiles => view! { <UstensilesScreen /> }.into_any(),
        Screen::DishOfDay => view! { <DishOfDayScreen /> }.into_any(),
        Screen::Users => view! { <UsersScreen /> }.into_any(),
    };

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">
                <NoticeBanner />
                {current}
            </main>
        </div>
    }
}
