use leptos_listview::{deserialize_id, Entity, FieldValue, Labeled, Listable, LooseNumber};
use serde::{Deserialize, Serialize};

/// Kitchen utensil
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ustensile {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: LooseNumber,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

impl Entity for Ustensile {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Labeled for Ustensile {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Listable for Ustensile {
    fn is_archived(&self) -> bool {
        self.archived
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn sort_value(&self, field: &str) -> FieldValue {
        match field {
            "quantity" => self.quantity.into(),
            _ => (&self.name).into(),
        }
    }
}
