//! Entity Contracts
//!
//! Traits a resource type implements to be listed, plus the loosely-typed
//! wire values (ids, numbers, references) backends send for those types.

use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Anything with a backend-assigned identifier
pub trait Entity {
    fn id(&self) -> &str;
}

/// Entity with a designated display label (used when shown as a reference)
pub trait Labeled: Entity {
    fn label(&self) -> &str;
}

/// Entity that can be driven through the list pipeline
pub trait Listable: Entity {
    fn is_archived(&self) -> bool;

    /// Text fields the search term is matched against (logical OR)
    fn search_fields(&self) -> Vec<&str>;

    /// Comparable value for the named sort field
    fn sort_value(&self, field: &str) -> FieldValue;
}

// ========================
// Field Values
// ========================

/// Type-aware sort key
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    /// Text value where a missing string sorts as empty
    pub fn text(value: Option<&str>) -> Self {
        FieldValue::Text(value.unwrap_or_default().to_string())
    }

    /// Label of a reference, empty when unresolved or absent
    pub fn reference<T: Labeled>(value: Option<&Ref<T>>) -> Self {
        FieldValue::text(value.map(Ref::label))
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Text(_) => 2,
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(if value.is_finite() { value } else { 0.0 })
    }
}

impl From<LooseNumber> for FieldValue {
    fn from(value: LooseNumber) -> Self {
        FieldValue::Number(value.0)
    }
}

// ========================
// Loose Numbers
// ========================

/// Number that may arrive as a JSON number, a numeric string, or garbage.
/// Anything non-numeric reads as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LooseNumber(pub f64);

impl LooseNumber {
    pub fn from_json(value: &Value) -> Self {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        LooseNumber(parsed.filter(|n| n.is_finite()).unwrap_or(0.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for LooseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}

impl<'de> Deserialize<'de> for LooseNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(LooseNumber::from_json(&raw))
    }
}

impl Serialize for LooseNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

// ========================
// Ids and References
// ========================

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("_id").or_else(|| map.get("id")).and_then(id_from_value),
        _ => None,
    }
}

/// Accept an id sent as a string, a number, or an object carrying `_id`/`id`
pub fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    id_from_value(&raw).ok_or_else(|| de::Error::custom(format!("expected an id, got {}", raw)))
}

/// Drop `id` from every object that also carries `_id`, nested ones included.
/// Models read either key through one field, so a row sending both would
/// otherwise be rejected as a duplicate.
pub fn collapse_ids(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key("_id") {
                map.remove("id");
            }
            map.values_mut().for_each(collapse_ids);
        }
        Value::Array(items) => items.iter_mut().for_each(collapse_ids),
        _ => {}
    }
}

/// Foreign key that the backend either expands into an object or leaves as a bare id
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Resolved(T),
    Unresolved(#[serde(deserialize_with = "deserialize_id")] String),
}

impl<T: Entity> Ref<T> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Resolved(target) => target.id(),
            Ref::Unresolved(id) => id,
        }
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Ref::Resolved(target) => Some(target),
            Ref::Unresolved(_) => None,
        }
    }
}

impl<T: Labeled> Ref<T> {
    pub fn label(&self) -> &str {
        match self {
            Ref::Resolved(target) => target.label(),
            Ref::Unresolved(_) => "",
        }
    }
}

/// References go back to the backend as plain ids
impl<T: Entity> Serialize for Ref<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Category {
        #[serde(alias = "_id", deserialize_with = "deserialize_id")]
        id: String,
        #[serde(default)]
        label: String,
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

    #[test]
    fn test_ref_accepts_bare_id_and_expanded_object() {
        let bare: Ref<Category> = serde_json::from_str(r#""c1""#).unwrap();
        assert_eq!(bare, Ref::Unresolved("c1".to_string()));
        assert_eq!(bare.id(), "c1");
        assert_eq!(bare.label(), "");

        let expanded: Ref<Category> =
            serde_json::from_str(r#"{"_id":"c2","label":"Desserts"}"#).unwrap();
        assert_eq!(expanded.id(), "c2");
        assert_eq!(expanded.label(), "Desserts");
        assert!(expanded.resolved().is_some());
    }

    #[test]
    fn test_ref_accepts_numeric_id_and_serializes_as_id() {
        let numeric: Ref<Category> = serde_json::from_str("42").unwrap();
        assert_eq!(numeric.id(), "42");

        let expanded: Ref<Category> = serde_json::from_str(r#"{"id":7,"label":"Mains"}"#).unwrap();
        assert_eq!(serde_json::to_string(&expanded).unwrap(), r#""7""#);
    }

    #[test]
    fn test_collapse_ids_keeps_underscore_id() {
        let mut rows = serde_json::json!([
            {"_id": "c1", "id": "c1", "label": "Soups", "parent": {"_id": "c0", "id": "c0"}},
            {"id": 9, "label": "Mains"}
        ]);
        collapse_ids(&mut rows);
        assert_eq!(
            rows[0],
            serde_json::json!({"_id": "c1", "label": "Soups", "parent": {"_id": "c0"}})
        );
        assert_eq!(rows[1]["id"], 9);

        let categories: Vec<Category> = serde_json::from_value(rows).unwrap();
        assert_eq!(categories[0].id, "c1");
        assert_eq!(categories[1].id, "9");
    }

    #[test]
    fn test_loose_number_parsing() {
        let values: Vec<LooseNumber> =
            serde_json::from_str(r#"["3", 5, " 1.5 ", "abc", null, true]"#).unwrap();
        let plain: Vec<f64> = values.iter().map(|n| n.value()).collect();
        assert_eq!(plain, vec![3.0, 5.0, 1.5, 0.0, 0.0, 0.0]);
        assert_eq!(LooseNumber(4.0).to_string(), "4");
        assert_eq!(LooseNumber(4.5).to_string(), "4.50");
    }

    #[test]
    fn test_field_value_ordering() {
        assert_eq!(FieldValue::from("apple").compare(&FieldValue::from("Banana")), Ordering::Less);
        assert_eq!(FieldValue::from("ABC").compare(&FieldValue::from("abc")), Ordering::Equal);
        assert_eq!(FieldValue::from(10.0).compare(&FieldValue::from(9.0)), Ordering::Greater);
        assert_eq!(FieldValue::from(false).compare(&FieldValue::from(true)), Ordering::Less);
        assert_eq!(FieldValue::text(None), FieldValue::Text(String::new()));
        assert_eq!(FieldValue::from(f64::NAN), FieldValue::Number(0.0));
    }
}
