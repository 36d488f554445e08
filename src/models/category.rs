use leptos_listview::{deserialize_id, Entity, FieldValue, Labeled, Listable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, alias = "name")]
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

impl Entity for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Labeled for Category {
    fn label(&self) -> &str {
        &self.label
    }
}

impl Listable for Category {
    fn is_archived(&self) -> bool {
        self.archived
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.label.as_str()]
    }

    fn sort_value(&self, field: &str) -> FieldValue {
        match field {
            "description" => FieldValue::text(self.description.as_deref()),
            _ => (&self.label).into(),
        }
    }
}
