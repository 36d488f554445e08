use leptos_listview::{deserialize_id, Entity, FieldValue, Labeled, Listable, LooseNumber, Ref};
use serde::{Deserialize, Serialize};

use super::Recipe;

/// Variation of a recipe (size, spice level, ...) with its own rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recipe: Option<Ref<Recipe>>,
    #[serde(default)]
    pub rate: LooseNumber,
    #[serde(default)]
    pub archived: bool,
}

impl Entity for Variant {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Labeled for Variant {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Listable for Variant {
    fn is_archived(&self) -> bool {
        self.archived
    }

    fn search_fields(&self) -> Vec<&str> {
        let recipe = self.recipe.as_ref().map(Ref::label).unwrap_or_default();
        vec![self.name.as_str(), recipe]
    }

    fn sort_value(&self, field: &str) -> FieldValue {
        match field {
            "rate" => self.rate.into(),
            "recipe" => FieldValue::reference(self.recipe.as_ref()),
            _ => (&self.name).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos_listview::{compute_visible, ListState};

    #[test]
    fn test_rates_as_strings_and_numbers_sort_numerically() {
        let json = r#"[
            {"_id": "a", "name": "Large", "rate": "3"},
            {"_id": "b", "name": "Spicy", "rate": 5},
            {"_id": "c", "name": "Small", "rate": "1"}
        ]"#;
        let variants: Vec<Variant> = serde_json::from_str(json).unwrap();
        let page = compute_visible(&variants, &ListState::new("rate"));
        let rates: Vec<f64> = page.rows.iter().map(|v| v.rate.value()).collect();
        assert_eq!(rates, vec![1.0, 3.0, 5.0]);
    }
}
