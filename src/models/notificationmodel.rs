use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Notification {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub title: String,
    pub message: String,
    pub r#type: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_serializes_without_prefix() {
        let notification = Notification {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            title: "New Essay Request".to_string(),
            message: "New essay request: Greek History".to_string(),
            r#type: "new_request".to_string(),
            read: false,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["type"], "new_request");
    }
}
