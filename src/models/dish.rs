use chrono::NaiveDate;
use leptos_listview::{deserialize_id, Entity, FieldValue, Listable, Ref};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Product;

/// Product scheduled as dish of the day on a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishOfDay {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_day")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub product: Option<Ref<Product>>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

/// Accepts `2024-05-01` as well as a full timestamp `2024-05-01T00:00:00.000Z`.
/// Null, non-string or unparseable dates decode to `None`.
fn deserialize_day<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    let Some(raw) = raw.as_str() else {
        return Ok(None);
    };
    let day = raw.get(..10).unwrap_or(raw);
    Ok(NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

impl DishOfDay {
    /// `YYYY-MM-DD`, or empty when the date is missing
    pub fn day_text(&self) -> String {
        self.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date == Some(day)
    }
}

impl Entity for DishOfDay {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Listable for DishOfDay {
    fn is_archived(&self) -> bool {
        self.archived
    }

    fn search_fields(&self) -> Vec<&str> {
        let product = self.product.as_ref().map(|p| p.label()).unwrap_or_default();
        vec![product, self.note.as_deref().unwrap_or_default()]
    }

    fn sort_value(&self, field: &str) -> FieldValue {
        match field {
            "product" => FieldValue::reference(self.product.as_ref()),
            _ => FieldValue::Text(self.day_text()),
        }
    }
}

/// Active dishes from `today` on, earliest first
pub fn upcoming(dishes: &[DishOfDay], today: NaiveDate) -> Vec<&DishOfDay> {
    let mut next: Vec<&DishOfDay> = dishes
        .iter()
        .filter(|dish| !dish.archived && dish.date.is_some_and(|date| date >= today))
        .collect();
    next.sort_by_key(|dish| dish.date);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_date_accepts_timestamps() {
        let json = r#"[
            {"_id": "d1", "date": "2026-10-20T00:00:00.000Z",
             "product": {"_id": "p1", "name": "Ratatouille"}},
            {"_id": "d2", "date": "2026-10-18", "product": "p2"}
        ]"#;
        let dishes: Vec<DishOfDay> = serde_json::from_str(json).unwrap();
        assert_eq!(dishes[0].date, Some(day("2026-10-20")));
        assert_eq!(dishes[0].search_fields()[0], "Ratatouille");
        assert_eq!(serde_json::to_value(&dishes[1]).unwrap()["date"], "2026-10-18");
    }

    #[test]
    fn test_upcoming_skips_past_and_archived() {
        let json = r#"[
            {"_id": "a", "date": "2026-10-25"},
            {"_id": "b", "date": "2026-10-10"},
            {"_id": "c", "date": "2026-10-17"},
            {"_id": "d", "date": "2026-10-19", "archived": true}
        ]"#;
        let dishes: Vec<DishOfDay> = serde_json::from_str(json).unwrap();
        let next = upcoming(&dishes, day("2026-10-17"));
        let ids: Vec<&str> = next.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_missing_date_does_not_fail_the_list() {
        let json = r#"[
            {"_id": "a", "date": "2026-10-20"},
            {"_id": "b", "date": null},
            {"_id": "c"},
            {"_id": "d", "date": "soon"}
        ]"#;
        let dishes: Vec<DishOfDay> = serde_json::from_str(json).unwrap();
        assert_eq!(dishes.len(), 4);
        assert_eq!(dishes[1].date, None);
        assert_eq!(dishes[2].day_text(), "");
        assert_eq!(dishes[3].date, None);
        assert_eq!(dishes[2].sort_value("date"), FieldValue::Text(String::new()));

        let next = upcoming(&dishes, day("2026-10-01"));
        let ids: Vec<&str> = next.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }
}
