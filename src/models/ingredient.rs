use leptos_listview::{deserialize_id, Entity, FieldValue, Labeled, Listable, LooseNumber};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit: String,
    /// Stock on hand, in `unit`
    #[serde(default)]
    pub quantity: LooseNumber,
    /// Cost of one `unit`
    #[serde(default, alias = "price")]
    pub unit_price: LooseNumber,
    #[serde(default)]
    pub archived: bool,
}

impl Entity for Ingredient {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Labeled for Ingredient {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Listable for Ingredient {
    fn is_archived(&self) -> bool {
        self.archived
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.unit.as_str()]
    }

    fn sort_value(&self, field: &str) -> FieldValue {
        match field {
            "unit" => (&self.unit).into(),
            "quantity" => self.quantity.into(),
            "unitPrice" => self.unit_price.into(),
            _ => (&self.name).into(),
        }
    }
}
