//! Application Context
//!
//! Services built once at startup and provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            api: ApiClient::new(&config),
            config,
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
