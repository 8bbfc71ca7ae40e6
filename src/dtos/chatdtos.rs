use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageDto {
    pub request_id: Uuid,

    pub receiver_id: Uuid,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_message() {
        let dto = SendMessageDto {
            request_id: Uuid::new_v4(),
            receiver_id: Uuid::new_v4(),
            message: String::new(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn accepts_non_empty_message() {
        let dto = SendMessageDto {
            request_id: Uuid::new_v4(),
            receiver_id: Uuid::new_v4(),
            message: "When can I expect the first draft?".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
