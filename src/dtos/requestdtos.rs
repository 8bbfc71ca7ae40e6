use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create and update share one payload; updates are a full field overwrite.
#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequestDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub due_date: DateTime<Utc>,

    #[validate(range(min = 1, message = "Word count must be at least 1"))]
    pub word_count: i32,

    #[validate(length(min = 1, message = "Assignment type is required"))]
    pub assignment_type: String,

    #[validate(length(min = 1, message = "Field of study is required"))]
    pub field_of_study: String,

    #[serde(default)]
    pub attachments: Vec<String>,

    pub extra_information: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RequestListQueryDto {
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignQueryDto {
    pub supervisor_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_dto() -> CreateRequestDto {
        CreateRequestDto {
            title: "Climate policy essay".to_string(),
            due_date: Utc::now(),
            word_count: 2000,
            assignment_type: "essay".to_string(),
            field_of_study: "political_science".to_string(),
            attachments: vec![],
            extra_information: None,
        }
    }

    #[test]
    fn accepts_complete_payload() {
        assert!(base_dto().validate().is_ok());
    }

    #[test]
    fn rejects_empty_title() {
        let mut dto = base_dto();
        dto.title = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_zero_word_count() {
        let mut dto = base_dto();
        dto.word_count = 0;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn attachments_default_to_empty() {
        let dto: CreateRequestDto = serde_json::from_value(serde_json::json!({
            "title": "Essay",
            "due_date": "2025-09-01T00:00:00Z",
            "word_count": 1500,
            "assignment_type": "essay",
            "field_of_study": "history",
        }))
        .unwrap();
        assert!(dto.attachments.is_empty());
        assert!(dto.extra_information.is_none());
    }
}
