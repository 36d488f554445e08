#![allow(warnings)]
//! Menu Admin Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod cost;
mod error;
mod forms;
mod markdown;
mod models;
mod screens;
mod stats;
mod store;
mod wizard;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    let config = AppConfig::load();
    if let Err(err) = console_logger::init_logger("MenuAdmin", config.log_level) {
        web_sys::console::warn_1(&format!("logger already set: {}", err).into());
    }
    console_error_panic_hook::set_once();
    log::info!("[Main] starting, page size {}", config.items_per_page);
    mount_to_body(move || view! { <App config=config /> });
}
