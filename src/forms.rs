//! Form Schemas
//!
//! Add/Edit/View modals edit a JSON working copy of one entity. A static
//! schema per resource says which keys are shown, how they are input, and
//! the presence/type checks run before anything is sent.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::api::ResourceDef;

/// Working copy of one entity
pub type Draft = Map<String, Value>;

/// Keys the generic edit path never sends
const SERVER_OWNED: &[&str] = &["id", "_id", "archived"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    LongText,
    /// Non-negative number
    Number,
    Checkbox,
    /// `YYYY-MM-DD`
    Date,
    /// Id of another resource, picked from its list
    Reference(&'static ResourceDef),
    /// Any number of ids of another resource, kept as a JSON array
    References(&'static ResourceDef),
    Role,
    /// File input, sent as a multipart part rather than a payload key
    Photo,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_len: usize,
}

impl FieldDef {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            min_len: 0,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub key: &'static str,
    pub message: String,
}

pub fn draft_from<T: Serialize>(entity: &T) -> Draft {
    match serde_json::to_value(entity) {
        Ok(Value::Object(map)) => map,
        _ => Draft::new(),
    }
}

pub fn empty_draft(schema: &[FieldDef]) -> Draft {
    schema
        .iter()
        .filter(|field| field.kind != FieldKind::Photo)
        .map(|field| {
            let initial = match field.kind {
                FieldKind::Checkbox => Value::Bool(false),
                FieldKind::Role => Value::String("user".into()),
                FieldKind::References(_) => Value::Array(Vec::new()),
                _ => Value::String(String::new()),
            };
            (field.key.to_string(), initial)
        })
        .collect()
}

/// Value as shown in an input
pub fn display_value(draft: &Draft, key: &str) -> String {
    match draft.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn is_checked(draft: &Draft, key: &str) -> bool {
    draft.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Ids held by a multi-reference key, in order, without blanks
pub fn selected_ids(draft: &Draft, key: &str) -> Vec<String> {
    let Some(Value::Array(items)) = draft.get(key) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(map) => map.get("_id").or_else(|| map.get("id")).and_then(|id| match id {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
            _ => None,
        })
        .filter(|id| !id.is_empty())
        .collect()
}

pub fn set_selected(draft: &mut Draft, key: &str, id: &str, selected: bool) {
    let mut ids = selected_ids(draft, key);
    ids.retain(|existing| existing != id);
    if selected {
        ids.push(id.to_string());
    }
    draft.insert(key.to_string(), Value::Array(ids.into_iter().map(Value::String).collect()));
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn validate(schema: &[FieldDef], draft: &Draft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for field in schema {
        if matches!(field.kind, FieldKind::Checkbox | FieldKind::Photo) {
            continue;
        }
        if let FieldKind::References(_) = field.kind {
            if field.required && selected_ids(draft, field.key).is_empty() {
                errors.push(FieldError {
                    key: field.key,
                    message: format!("{} needs at least one entry", field.label),
                });
            }
            continue;
        }
        let raw = display_value(draft, field.key);
        let value = raw.trim();
        let mut fail = |message: String| errors.push(FieldError { key: field.key, message });

        if value.is_empty() {
            if field.required {
                fail(format!("{} is required", field.label));
            }
            continue;
        }
        if field.min_len > 0 && value.chars().count() < field.min_len {
            fail(format!("{} must be at least {} characters", field.label, field.min_len));
            continue;
        }
        match field.kind {
            FieldKind::Number => match parse_number(value) {
                None => fail(format!("{} must be a number", field.label)),
                Some(n) if n < 0.0 => fail(format!("{} cannot be negative", field.label)),
                Some(_) => {}
            },
            FieldKind::Date => {
                if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                    fail(format!("{} must be a date (YYYY-MM-DD)", field.label));
                }
            }
            _ => {}
        }
    }
    errors
}

/// Shape a validated draft for the backend
pub fn to_payload(schema: &[FieldDef], draft: &Draft) -> Value {
    let mut payload = draft.clone();
    for key in SERVER_OWNED {
        payload.remove(*key);
    }
    for field in schema {
        let raw = display_value(draft, field.key);
        let value = raw.trim();
        match field.kind {
            FieldKind::Photo => {
                payload.remove(field.key);
            }
            FieldKind::Number => {
                let number = parse_number(value).and_then(Number::from_f64).map(Value::Number);
                payload.insert(field.key.into(), number.unwrap_or(Value::Null));
            }
            FieldKind::Reference(_) | FieldKind::Date if value.is_empty() => {
                payload.insert(field.key.into(), Value::Null);
            }
            FieldKind::Text | FieldKind::LongText | FieldKind::Reference(_) | FieldKind::Date => {
                payload.insert(field.key.into(), Value::String(value.to_string()));
            }
            FieldKind::Checkbox => {
                payload.insert(field.key.into(), Value::Bool(is_checked(draft, field.key)));
            }
            FieldKind::References(_) => {
                let ids = selected_ids(draft, field.key).into_iter().map(Value::String).collect();
                payload.insert(field.key.into(), Value::Array(ids));
            }
            FieldKind::Role => {}
        }
    }
    Value::Object(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CATEGORIES, PRODUCTS};
    use crate::models::{Menu, Product};
    use serde_json::json;

    static PRODUCT_FORM: [FieldDef; 5] = [
        FieldDef::new("name", "Name", FieldKind::Text).required().min_len(2),
        FieldDef::new("price", "Price", FieldKind::Number).required(),
        FieldDef::new("category", "Category", FieldKind::Reference(&CATEGORIES)),
        FieldDef::new("visible", "Visible", FieldKind::Checkbox),
        FieldDef::new("image", "Photo", FieldKind::Photo),
    ];

    fn draft(value: Value) -> Draft {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_draft_fails_required_fields() {
        let errors = validate(&PRODUCT_FORM, &empty_draft(&PRODUCT_FORM));
        let keys: Vec<&str> = errors.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["name", "price"]);
        assert_eq!(errors[0].message, "Name is required");
    }

    #[test]
    fn test_type_and_length_checks() {
        let errors = validate(&PRODUCT_FORM, &draft(json!({"name": "X", "price": "-2"})));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "Name must be at least 2 characters");
        assert_eq!(errors[1].message, "Price cannot be negative");

        let errors = validate(&PRODUCT_FORM, &draft(json!({"name": "Tea", "price": "abc"})));
        assert_eq!(errors[0].message, "Price must be a number");

        assert!(validate(&PRODUCT_FORM, &draft(json!({"name": "Tea", "price": 2.5}))).is_empty());
    }

    #[test]
    fn test_payload_from_edited_entity() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Tarte",
            "price": "6.5",
            "category": {"_id": "c1", "label": "Desserts"},
            "visible": true,
            "archived": true
        }))
        .unwrap();
        let mut working = draft_from(&product);
        assert_eq!(display_value(&working, "category"), "c1");
        assert_eq!(display_value(&working, "price"), "6.5");

        working.insert("price".into(), json!(" 7 "));
        working.insert("name".into(), json!(" Tarte fine "));
        let payload = to_payload(&PRODUCT_FORM, &working);

        assert_eq!(payload["name"], "Tarte fine");
        assert_eq!(payload["price"], 7.0);
        assert_eq!(payload["category"], "c1");
        assert_eq!(payload["visible"], true);
        assert!(payload.get("archived").is_none());
        assert!(payload.get("id").is_none());
        assert!(payload.get("image").is_none());
    }

    #[test]
    fn test_blank_reference_sends_null() {
        let mut working = empty_draft(&PRODUCT_FORM);
        working.insert("name".into(), json!("Tea"));
        working.insert("price".into(), json!("3"));
        let payload = to_payload(&PRODUCT_FORM, &working);
        assert_eq!(payload["category"], Value::Null);
        assert_eq!(payload["visible"], false);
    }

    static MENU_FORM: [FieldDef; 2] = [
        FieldDef::new("name", "Name", FieldKind::Text).required(),
        FieldDef::new("products", "Products", FieldKind::References(&PRODUCTS)).required(),
    ];

    #[test]
    fn test_multi_reference_round_trip() {
        let mut working = empty_draft(&MENU_FORM);
        working.insert("name".into(), json!("Lunch"));
        let errors = validate(&MENU_FORM, &working);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Products needs at least one entry");

        set_selected(&mut working, "products", "p1", true);
        set_selected(&mut working, "products", "p2", true);
        set_selected(&mut working, "products", "p1", false);
        set_selected(&mut working, "products", "p2", true);
        assert!(validate(&MENU_FORM, &working).is_empty());
        assert_eq!(to_payload(&MENU_FORM, &working)["products"], json!(["p2"]));

        let menu: Menu = serde_json::from_value(json!({
            "_id": "m1",
            "name": "Brunch",
            "products": [{"_id": "p7", "name": "Toast"}, "p8"]
        }))
        .unwrap();
        let working = draft_from(&menu);
        assert_eq!(selected_ids(&working, "products"), vec!["p7", "p8"]);
        assert_eq!(to_payload(&MENU_FORM, &working)["products"], json!(["p7", "p8"]));
    }
}
