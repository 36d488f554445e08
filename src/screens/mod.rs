//! Admin Screens
//!
//! One module per resource. Each declares its columns, form schema and
//! screen definition, then mounts the generic ResourceScreen.

mod categories;
mod dishes;
mod ingredients;
mod menus;
mod products;
mod recipes;
mod statistics;
mod users;
mod ustensiles;
mod variants;

pub use categories::CategoriesScreen;
pub use dishes::DishOfDayScreen;
pub use ingredients::IngredientsScreen;
pub use menus::MenusScreen;
pub use products::ProductsScreen;
pub use recipes::RecipesScreen;
pub use statistics::StatisticsScreen;
pub use users::UsersScreen;
pub use ustensiles::UstensilesScreen;
pub use variants::VariantsScreen;

pub(crate) fn optional_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub(crate) fn money(value: f64) -> String {
    format!("{:.2}", value)
}

pub(crate) fn yes_no(value: bool) -> String {
    let text = if value { "Yes" } else { "No" };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_formatting() {
        assert_eq!(money(6.5), "6.50");
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(optional_text(&None), "");
    }
}
