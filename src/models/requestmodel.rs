use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl RequestStatus {
    pub fn to_str(&self) -> &str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct EssayRequest {
    pub id: uuid::Uuid,
    pub student_id: uuid::Uuid,
    pub title: String,
    pub due_date: DateTime<Utc>,
    pub word_count: i32,
    pub assignment_type: String,
    pub field_of_study: String,
    pub attachments: Vec<String>,
    pub extra_information: Option<String>,
    pub status: RequestStatus,
    pub assigned_supervisor: Option<uuid::Uuid>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(RequestStatus::Completed).unwrap(),
            serde_json::json!("completed")
        );
    }
}
