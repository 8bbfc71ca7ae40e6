use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Supervisor,
    Admin,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Student => "student",
            UserRole::Supervisor => "supervisor",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "student" => Some(UserRole::Student),
            "supervisor" => Some(UserRole::Supervisor),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub profile_pic: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [UserRole::Student, UserRole::Supervisor, UserRole::Admin] {
            assert_eq!(UserRole::from_str(role.to_str()), Some(role));
        }
        assert_eq!(UserRole::from_str("principal"), None);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(UserRole::Supervisor).unwrap(),
            serde_json::json!("supervisor")
        );
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: uuid::Uuid::new_v4(),
            email: "student@university.gr".to_string(),
            name: "Maria".to_string(),
            role: UserRole::Student,
            password_hash: "$argon2id$secret".to_string(),
            profile_pic: None,
            active: true,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
    }
}
