//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod entity_modal;
mod nav_bar;
mod notice_banner;
mod recipe_wizard;
pub mod resource_table;

pub use delete_confirm_button::DeleteConfirmButton;
pub use entity_modal::EntityModal;
pub use nav_bar::NavBar;
pub use notice_banner::NoticeBanner;
pub use recipe_wizard::RecipeWizardModal;
pub use resource_table::{create_resource_list, refetch, Column, ResourceScreen, ScreenDef};
