//! Cost Tracking
//!
//! Recipe cost is the sum of quantity x unit price over every ingredient
//! line. Unknown ingredients cost nothing.

use std::collections::HashMap;

use leptos_listview::Entity;

use crate::models::{Ingredient, IngredientGroup, Product, Recipe};
use crate::wizard::RecipeDraft;

fn price_index(ingredients: &[Ingredient]) -> HashMap<&str, f64> {
    ingredients
        .iter()
        .map(|ingredient| (ingredient.id(), ingredient.unit_price.value()))
        .collect()
}

/// Listed price wins; an expanded reference's own price is the fallback
pub fn recipe_cost(groups: &[IngredientGroup], ingredients: &[Ingredient]) -> f64 {
    let prices = price_index(ingredients);
    groups
        .iter()
        .flat_map(|group| group.items.iter())
        .map(|line| {
            let unit_price = prices
                .get(line.ingredient.id())
                .copied()
                .or_else(|| line.ingredient.resolved().map(|i| i.unit_price.value()))
                .unwrap_or(0.0);
            line.quantity.value() * unit_price
        })
        .sum()
}

pub fn draft_cost(draft: &RecipeDraft, ingredients: &[Ingredient]) -> f64 {
    let prices = price_index(ingredients);
    draft
        .groups
        .iter()
        .flat_map(|group| group.lines.iter())
        .map(|line| {
            let quantity = line.quantity.trim().parse::<f64>().unwrap_or(0.0);
            quantity * prices.get(line.ingredient_id.as_str()).copied().unwrap_or(0.0)
        })
        .sum()
}

pub fn cost_per_portion(total: f64, portions: f64) -> f64 {
    total / portions.max(1.0)
}

/// Price vs. recipe cost for one product
#[derive(Clone, Debug, PartialEq)]
pub struct CostRow {
    pub product: String,
    pub recipe: Option<String>,
    pub price: f64,
    pub cost: Option<f64>,
}

impl CostRow {
    pub fn margin(&self) -> Option<f64> {
        self.cost.map(|cost| self.price - cost)
    }
}

/// Active products with their recipe cost, when the recipe is known
pub fn product_costs(
    products: &[Product],
    recipes: &[Recipe],
    ingredients: &[Ingredient],
) -> Vec<CostRow> {
    let by_id: HashMap<&str, &Recipe> =
        recipes.iter().map(|recipe| (recipe.id(), recipe)).collect();
    products
        .iter()
        .filter(|product| !product.archived)
        .map(|product| {
            let recipe = product.recipe.as_ref().and_then(|r| {
                by_id.get(r.id()).copied().or_else(|| r.resolved())
            });
            CostRow {
                product: product.name.clone(),
                recipe: recipe.map(|r| r.name.clone()),
                price: product.price.value(),
                cost: recipe.map(|r| recipe_cost(&r.ingredient_groups, ingredients)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{GroupDraft, LineDraft};
    use serde_json::json;

    fn ingredients() -> Vec<Ingredient> {
        serde_json::from_value(json!([
            {"_id": "flour", "name": "Flour", "unit": "kg", "unitPrice": "1.2"},
            {"_id": "milk", "name": "Milk", "unit": "l", "unitPrice": 0.9}
        ]))
        .unwrap()
    }

    fn recipe() -> Recipe {
        serde_json::from_value(json!({
            "_id": "r1",
            "name": "Crêpes",
            "ingredientGroups": [
                {"title": "Batter", "items": [
                    {"ingredient": "flour", "quantity": 0.5},
                    {"ingredient": "milk", "quantity": "2"}
                ]},
                {"title": "Topping", "items": [
                    {
                        "ingredient": {"_id": "sugar", "name": "Sugar", "unitPrice": 2},
                        "quantity": 0.25
                    },
                    {"ingredient": "unknown", "quantity": 3}
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_recipe_cost() {
        let cost = recipe_cost(&recipe().ingredient_groups, &ingredients());
        assert!((cost - (0.6 + 1.8 + 0.5)).abs() < 1e-9);
        assert!((cost_per_portion(cost, 0.0) - cost).abs() < 1e-9);
        assert!((cost_per_portion(2.9, 2.0) - 1.45).abs() < 1e-9);
    }

    #[test]
    fn test_draft_cost() {
        let draft = RecipeDraft {
            groups: vec![GroupDraft {
                title: "Base".into(),
                lines: vec![
                    LineDraft {
                        ingredient_id: "milk".into(),
                        quantity: "10".into(),
                        unit: "l".into(),
                    },
                    LineDraft {
                        ingredient_id: "".into(),
                        quantity: "4".into(),
                        unit: String::new(),
                    },
                ],
            }],
            ..RecipeDraft::default()
        };
        assert!((draft_cost(&draft, &ingredients()) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_product_costs_and_margin() {
        let products: Vec<Product> = serde_json::from_value(json!([
            {"_id": "p1", "name": "Crêpe", "price": 5, "recipe": "r1"},
            {"_id": "p2", "name": "Water", "price": 1},
            {"_id": "p3", "name": "Old", "price": 3, "recipe": "r1", "archived": true}
        ]))
        .unwrap();
        let rows = product_costs(&products, &[recipe()], &ingredients());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].recipe.as_deref(), Some("Crêpes"));
        assert!((rows[0].margin().unwrap() - 2.1).abs() < 1e-9);
        assert_eq!(rows[1].cost, None);
        assert_eq!(rows[1].margin(), None);
    }
}
