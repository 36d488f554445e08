//! Nav Bar Component
//!
//! Tab bar for switching between admin screens.

use leptos::prelude::*;

use crate::store::{store_open_screen, use_app_store, AppStateStoreFields, Screen};

#[component]
pub fn NavBar() -> impl IntoView {
    let store = use_app_store();

    view! {
        <nav class="nav-bar">
            <span class="nav-brand">"Menu Admin"</span>
            {Screen::ALL
                .into_iter()
                .map(|screen| {
                    let tab_class = move || {
                        if store.screen().get() == screen { "nav-tab active" } else { "nav-tab" }
                    };
                    view! {
                        <button class=tab_class on:click=move |_| store_open_screen(&store, screen)>
                            {screen.title()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
