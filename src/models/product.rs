use leptos_listview::{deserialize_id, Entity, FieldValue, Labeled, Listable, LooseNumber, Ref};
use serde::{Deserialize, Serialize};

use super::{Category, Recipe};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: LooseNumber,
    #[serde(default)]
    pub category: Option<Ref<Category>>,
    #[serde(default)]
    pub recipe: Option<Ref<Recipe>>,
    #[serde(default)]
    pub visible: bool,
    /// Photo URL assigned by the backend after upload
    #[serde(default, alias = "photo")]
    pub image: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

impl Entity for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Labeled for Product {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Listable for Product {
    fn is_archived(&self) -> bool {
        self.archived
    }

    fn search_fields(&self) -> Vec<&str> {
        let category = self.category.as_ref().map(Ref::label).unwrap_or_default();
        let recipe = self.recipe.as_ref().map(Ref::label).unwrap_or_default();
        vec![self.name.as_str(), category, recipe]
    }

    fn sort_value(&self, field: &str) -> FieldValue {
        match field {
            "price" => self.price.into(),
            "category" => FieldValue::reference(self.category.as_ref()),
            "recipe" => FieldValue::reference(self.recipe.as_ref()),
            "visible" => self.visible.into(),
            _ => (&self.name).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos_listview::{compute_visible, ListState};

    fn products() -> Vec<Product> {
        let json = r#"[
            {"_id": "p1", "name": "Tarte", "price": "6.5",
             "category": {"_id": "c1", "label": "Desserts"}},
            {"_id": "p2", "name": "Steak", "price": 18, "category": "c2",
             "recipe": {"_id": "r1", "name": "Grill sauce"}},
            {"_id": "p3", "name": "Salade", "price": 9,
             "category": {"_id": "c3", "label": "Starters"}, "archived": true},
            {"_id": "p4", "name": "Soupe", "price": null, "category": null}
        ]"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_search_matches_nested_labels() {
        let items = products();
        let mut state = ListState::new("name");

        state.set_search_term("dessert");
        let page = compute_visible(&items, &state);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].id, "p1");

        state.set_search_term("GRILL");
        assert_eq!(compute_visible(&items, &state).rows[0].id, "p2");
    }

    #[test]
    fn test_sort_by_category_puts_unexpanded_first() {
        let items = products();
        let mut state = ListState::new("name");
        state.toggle_sort("category");
        let ids: Vec<String> =
            compute_visible(&items, &state).rows.into_iter().map(|p| p.id).collect();
        // p2 holds a bare id and p4 has none: both sort as "", in server order
        assert_eq!(ids, vec!["p2", "p4", "p1"]);
    }

    #[test]
    fn test_payload_sends_reference_ids() {
        let product = &products()[0];
        let value = serde_json::to_value(product).unwrap();
        assert_eq!(value["category"], "c1");
        assert_eq!(value["price"], 6.5);
    }
}
