//! Reference Options
//!
//! Lightweight `{id, label}` pairs for select inputs that point at another resource.

use serde_json::Value;

use super::{ApiClient, ResourceApi, ResourceDef};
use crate::error::ApiError;

#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

/// Archived entries are not offered
pub fn option_from_value(value: &Value) -> Option<SelectOption> {
    if value.get("archived").and_then(Value::as_bool).unwrap_or(false) {
        return None;
    }
    let id = match value.get("_id").or_else(|| value.get("id"))? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let label = ["label", "name", "title", "email"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .unwrap_or(&id)
        .to_string();
    Some(SelectOption { id, label })
}

pub async fn list_options(
    client: &ApiClient,
    def: &'static ResourceDef,
) -> Result<Vec<SelectOption>, ApiError> {
    let rows: Vec<Value> = client.resource::<Value>(def).list().await?;
    let mut options: Vec<SelectOption> = rows.iter().filter_map(option_from_value).collect();
    options.sort_by_key(|option| option.label.to_lowercase());
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_option_from_value() {
        assert_eq!(
            option_from_value(&json!({"_id": "c1", "label": "Desserts"})),
            Some(SelectOption { id: "c1".into(), label: "Desserts".into() })
        );
        assert_eq!(
            option_from_value(&json!({"id": 9, "name": "Flour"})),
            Some(SelectOption { id: "9".into(), label: "Flour".into() })
        );
        assert_eq!(option_from_value(&json!({"_id": "x"})).unwrap().label, "x");
        assert_eq!(option_from_value(&json!({"_id": "c2", "archived": true})), None);
        assert_eq!(option_from_value(&json!({"name": "no id"})), None);
    }
}
