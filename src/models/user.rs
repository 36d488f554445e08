use leptos_listview::{deserialize_id, Entity, FieldValue, Labeled, Listable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// Dashboard account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, alias = "username")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub archived: bool,
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Labeled for User {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Listable for User {
    fn is_archived(&self) -> bool {
        self.archived
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn sort_value(&self, field: &str) -> FieldValue {
        match field {
            "email" => (&self.email).into(),
            "role" => self.role.as_str().into(),
            _ => (&self.name).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_reads_as_user() {
        let json = r#"[
            {"_id": 1, "username": "ana", "role": "admin"},
            {"_id": 2, "name": "bo", "role": "chef"}
        ]"#;
        let users: Vec<User> = serde_json::from_str(json).unwrap();
        assert_eq!(users[0].id, "1");
        assert_eq!(users[0].name, "ana");
        assert_eq!(users[0].role, Role::Admin);
        assert_eq!(users[1].role, Role::User);
    }
}
