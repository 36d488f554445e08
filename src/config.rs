//! Application Configuration
//!
//! Values are baked in at build time from the environment, with defaults.

use std::fmt::Display;
use std::str::FromStr;

use log::LevelFilter;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Backend URL including its `/api` segment
    pub api_url: String,
    pub items_per_page: usize,
    /// How long a notice stays on screen
    pub notice_ms: u32,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_lookup(|key| match key {
            "MENU_ADMIN_API_URL" => option_env!("MENU_ADMIN_API_URL"),
            "MENU_ADMIN_PAGE_SIZE" => option_env!("MENU_ADMIN_PAGE_SIZE"),
            "MENU_ADMIN_NOTICE_MS" => option_env!("MENU_ADMIN_NOTICE_MS"),
            "MENU_ADMIN_LOG_LEVEL" => option_env!("MENU_ADMIN_LOG_LEVEL"),
            _ => None,
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<&'static str>) -> Self {
        let api_url = lookup("MENU_ADMIN_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_url,
            items_per_page: try_load(&lookup, "MENU_ADMIN_PAGE_SIZE", 5usize).max(1),
            notice_ms: try_load(&lookup, "MENU_ADMIN_NOTICE_MS", 4000u32),
            log_level: try_load(&lookup, "MENU_ADMIN_LOG_LEVEL", LevelFilter::Info),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<&'static str>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("[Config] invalid {key} value {raw:?}: {e}, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.items_per_page, 5);
        assert_eq!(config.notice_ms, 4000);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let config = AppConfig::from_lookup(|key| match key {
            "MENU_ADMIN_API_URL" => Some("https://admin.example.com/api/"),
            "MENU_ADMIN_PAGE_SIZE" => Some("ten"),
            "MENU_ADMIN_LOG_LEVEL" => Some("debug"),
            _ => None,
        });
        assert_eq!(config.api_url, "https://admin.example.com/api");
        assert_eq!(config.items_per_page, 5);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }
}
