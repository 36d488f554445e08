use leptos_listview::{deserialize_id, Entity, FieldValue, Labeled, Listable, LooseNumber, Ref};
use serde::{Deserialize, Serialize};

use super::{Category, Ingredient, Ustensile};

/// One ingredient quantity inside a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeLine {
    pub ingredient: Ref<Ingredient>,
    #[serde(default)]
    pub quantity: LooseNumber,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Named block of ingredients ("Dough", "Filling", ...)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientGroup {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "ingredients")]
    pub items: Vec<RecipeLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    #[serde(default)]
    pub order: u32,
    #[serde(default, alias = "instruction")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Ref<Category>>,
    #[serde(default)]
    pub portions: LooseNumber,
    #[serde(default)]
    pub ingredient_groups: Vec<IngredientGroup>,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    #[serde(default)]
    pub ustensiles: Vec<Ref<Ustensile>>,
    #[serde(default)]
    pub archived: bool,
}

impl Entity for Recipe {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Labeled for Recipe {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Listable for Recipe {
    fn is_archived(&self) -> bool {
        self.archived
    }

    fn search_fields(&self) -> Vec<&str> {
        let category = self.category.as_ref().map(Ref::label).unwrap_or_default();
        vec![self.name.as_str(), category]
    }

    fn sort_value(&self, field: &str) -> FieldValue {
        match field {
            "category" => FieldValue::reference(self.category.as_ref()),
            "portions" => self.portions.into(),
            "steps" => (self.steps.len() as f64).into(),
            _ => (&self.name).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_with_mixed_reference_shapes() {
        let json = r#"{
            "_id": "r1",
            "name": "Crêpes",
            "category": {"_id": "c1", "label": "Desserts"},
            "portions": "4",
            "ingredientGroups": [
                {"title": "Batter", "ingredients": [
                    {"ingredient": "i1", "quantity": "250", "unit": "g"},
                    {"ingredient": {"_id": "i2", "name": "Milk", "unitPrice": 1.2}, "quantity": 0.5}
                ]}
            ],
            "steps": [{"order": 1, "instruction": "Whisk"}],
            "ustensiles": ["u1"]
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id, "r1");
        assert_eq!(recipe.portions.value(), 4.0);
        assert_eq!(recipe.search_fields(), vec!["Crêpes", "Desserts"]);

        let lines = &recipe.ingredient_groups[0].items;
        assert_eq!(lines[0].ingredient.id(), "i1");
        assert_eq!(lines[0].quantity.value(), 250.0);
        assert_eq!(lines[1].ingredient.label(), "Milk");
        assert_eq!(recipe.steps[0].description, "Whisk");
        assert!(!recipe.archived);
    }
}
