//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds only
//! what outlives a screen: which screen is open and the current notice.
//! Resource lists stay with their screen's ListController.

use leptos::prelude::*;
use reactive_stores::Store;

/// Top-level screens, in nav bar order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Statistics,
    Menus,
    Categories,
    Products,
    Recipes,
    Variants,
    Ingredients,
    Ustensiles,
    DishOfDay,
    Users,
}

impl Screen {
    pub const ALL: [Screen; 10] = [
        Screen::Statistics,
        Screen::Menus,
        Screen::Categories,
        Screen::Products,
        Screen::Recipes,
        Screen::Variants,
        Screen::Ingredients,
        Screen::Ustensiles,
        Screen::DishOfDay,
        Screen::Users,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Statistics => "Statistics",
            Screen::Menus => "Menus",
            Screen::Categories => "Categories",
            Screen::Products => "Products",
            Screen::Recipes => "Recipes",
            Screen::Variants => "Variants",
            Screen::Ingredients => "Ingredients",
            Screen::Ustensiles => "Ustensiles",
            Screen::DishOfDay => "Dish of the day",
            Screen::Users => "Users",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient banner message
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    /// Distinguishes repeated identical messages for auto-dismiss
    pub seq: u32,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub screen: Screen,
    pub notice: Option<Notice>,
    /// Last notice sequence number handed out
    pub notice_seq: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_open_screen(store: &AppStore, screen: Screen) {
    if store.screen().get_untracked() != screen {
        log::debug!("[Store] open {:?}", screen);
        store.screen().set(screen);
        store.notice().set(None);
    }
}

/// Show a notice, replacing the current one; returns its sequence number
pub fn store_show_notice(store: &AppStore, kind: NoticeKind, message: impl Into<String>) -> u32 {
    let seq = store.notice_seq().get_untracked().wrapping_add(1);
    store.notice_seq().set(seq);
    store.notice().set(Some(Notice {
        seq,
        kind,
        message: message.into(),
    }));
    seq
}

pub fn store_notify_success(store: &AppStore, message: impl Into<String>) -> u32 {
    store_show_notice(store, NoticeKind::Success, message)
}

pub fn store_notify_error(store: &AppStore, message: impl Into<String>) -> u32 {
    let message = message.into();
    log::warn!("[Store] {}", message);
    store_show_notice(store, NoticeKind::Error, message)
}

/// Clear the notice only if it is still the one with `seq`
pub fn store_dismiss_notice(store: &AppStore, seq: u32) {
    let current = store.notice().with_untracked(|notice| notice.as_ref().map(|n| n.seq));
    if current == Some(seq) {
        store.notice().set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_titles_are_distinct() {
        let mut titles: Vec<&str> = Screen::ALL.iter().map(|s| s.title()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), Screen::ALL.len());
        assert_eq!(Screen::default(), Screen::Statistics);
    }

    #[test]
    fn test_notice_lifecycle() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(AppState::default());

        let first = store_notify_error(&store, "Category in use");
        let second = store_notify_success(&store, "Category deleted");
        assert_ne!(first, second);

        store_dismiss_notice(&store, first);
        let notice = store.notice().get_untracked();
        assert_eq!(notice.as_ref().map(|n| n.message.as_str()), Some("Category deleted"));
        assert_eq!(notice.map(|n| n.css_class()), Some("notice notice-success"));

        store_dismiss_notice(&store, second);
        assert_eq!(store.notice().get_untracked(), None);
    }

    #[test]
    fn test_switching_screen_clears_notice() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(AppState::default());

        store_notify_error(&store, "boom");
        store_open_screen(&store, Screen::Products);
        assert_eq!(store.screen().get_untracked(), Screen::Products);
        assert_eq!(store.notice().get_untracked(), None);
    }
}
