//! Frontend Models
//!
//! Data structures matching backend entities. Ids arrive as `_id` or `id`,
//! numbers may arrive as strings, and foreign keys may or may not be expanded.

mod category;
mod dish;
mod ingredient;
mod menu;
mod product;
mod recipe;
mod user;
mod ustensile;
mod variant;

pub use category::Category;
pub use dish::{upcoming, DishOfDay};
pub use ingredient::Ingredient;
pub use menu::Menu;
pub use product::Product;
pub use recipe::{IngredientGroup, Recipe, RecipeLine, RecipeStep};
pub use user::{Role, User};
pub use ustensile::Ustensile;
pub use variant::Variant;
