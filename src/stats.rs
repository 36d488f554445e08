//! Catalog Statistics
//!
//! Aggregates computed from the fetched lists. Archived rows only count
//! toward the archived totals.

use std::collections::BTreeMap;

use leptos_listview::Ref;

use crate::models::{Ingredient, Menu, Product, Recipe};

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogStats {
    pub products_active: usize,
    pub products_archived: usize,
    pub products_visible: usize,
    pub average_price: f64,
    /// (category label, active product count), largest first
    pub per_category: Vec<(String, usize)>,
    pub menus_active: usize,
    pub recipes_active: usize,
    pub ingredients_active: usize,
    /// (name, quantity, unit) at or below the threshold
    pub low_stock: Vec<(String, f64, String)>,
}

pub fn catalog_stats(
    products: &[Product],
    menus: &[Menu],
    recipes: &[Recipe],
    ingredients: &[Ingredient],
    low_stock_threshold: f64,
) -> CatalogStats {
    let active: Vec<&Product> = products.iter().filter(|p| !p.archived).collect();

    let average_price = if active.is_empty() {
        0.0
    } else {
        active.iter().map(|p| p.price.value()).sum::<f64>() / active.len() as f64
    };

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for product in &active {
        let label = product.category.as_ref().map(Ref::label).unwrap_or_default();
        let label = if label.is_empty() { UNCATEGORIZED } else { label };
        *counts.entry(label.to_string()).or_default() += 1;
    }
    let mut per_category: Vec<(String, usize)> = counts.into_iter().collect();
    // BTreeMap order is alphabetical; the stable sort keeps it for ties
    per_category.sort_by(|a, b| b.1.cmp(&a.1));

    let mut low_stock: Vec<(String, f64, String)> = ingredients
        .iter()
        .filter(|i| !i.archived && i.quantity.value() <= low_stock_threshold)
        .map(|i| (i.name.clone(), i.quantity.value(), i.unit.clone()))
        .collect();
    low_stock.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    CatalogStats {
        products_active: active.len(),
        products_archived: products.len() - active.len(),
        products_visible: active.iter().filter(|p| p.visible).count(),
        average_price,
        per_category,
        menus_active: menus.iter().filter(|m| !m.archived).count(),
        recipes_active: recipes.iter().filter(|r| !r.archived).count(),
        ingredients_active: ingredients.iter().filter(|i| !i.archived).count(),
        low_stock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_stats() {
        let products: Vec<Product> = serde_json::from_value(json!([
            {"_id": "1", "name": "A", "price": 10, "visible": true,
             "category": {"_id": "c1", "label": "Mains"}},
            {"_id": "2", "name": "B", "price": "20", "category": {"_id": "c1", "label": "Mains"}},
            {"_id": "3", "name": "C", "price": 6, "visible": true, "category": "c2"},
            {"_id": "4", "name": "D", "price": 1, "category": {"_id": "c3", "label": "Drinks"}},
            {"_id": "5", "name": "E", "price": 100, "archived": true}
        ]))
        .unwrap();
        let ingredients: Vec<Ingredient> = serde_json::from_value(json!([
            {"_id": "i1", "name": "Salt", "unit": "kg", "quantity": 0.5},
            {"_id": "i2", "name": "Rice", "unit": "kg", "quantity": "40"},
            {"_id": "i3", "name": "Oil", "unit": "l", "quantity": 0},
            {"_id": "i4", "name": "Gone", "unit": "l", "quantity": 0, "archived": true}
        ]))
        .unwrap();

        let stats = catalog_stats(&products, &[], &[], &ingredients, 1.0);
        assert_eq!(stats.products_active, 4);
        assert_eq!(stats.products_archived, 1);
        assert_eq!(stats.products_visible, 2);
        assert!((stats.average_price - 9.25).abs() < 1e-9);
        assert_eq!(
            stats.per_category,
            vec![
                ("Mains".to_string(), 2),
                ("Drinks".to_string(), 1),
                (UNCATEGORIZED.to_string(), 1),
            ]
        );
        assert_eq!(stats.ingredients_active, 3);
        let low: Vec<&str> = stats.low_stock.iter().map(|(name, _, _)| name.as_str()).collect();
        assert_eq!(low, vec!["Oil", "Salt"]);
    }

    #[test]
    fn test_empty_catalog() {
        let stats = catalog_stats(&[], &[], &[], &[], 5.0);
        assert_eq!(stats, CatalogStats::default());
    }
}
