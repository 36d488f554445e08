use leptos_listview::{deserialize_id, Entity, FieldValue, Labeled, Listable, LooseNumber, Ref};
use serde::{Deserialize, Serialize};

use super::Product;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: LooseNumber,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub products: Vec<Ref<Product>>,
    #[serde(default)]
    pub archived: bool,
}

impl Entity for Menu {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Labeled for Menu {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Listable for Menu {
    fn is_archived(&self) -> bool {
        self.archived
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_deref().unwrap_or_default()]
    }

    fn sort_value(&self, field: &str) -> FieldValue {
        match field {
            "price" => self.price.into(),
            "visible" => self.visible.into(),
            "products" => (self.products.len() as f64).into(),
            _ => (&self.name).into(),
        }
    }
}
