use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentDto {
    pub student_id: Uuid,

    pub request_id: Uuid,

    /// Legacy field kept for records created before the bidding flow existed.
    #[serde(default)]
    pub bid_id: Option<String>,

    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,

    #[validate(length(min = 1, message = "Payment details are required"))]
    pub payment_details: String,

    pub instructions: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePaymentDto {
    #[serde(default)]
    pub bid_id: Option<String>,

    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,

    #[validate(length(min = 1, message = "Payment details are required"))]
    pub payment_details: String,

    pub instructions: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreatePriceDto {
    pub request_id: Uuid,

    #[validate(range(min = 0.01, message = "Price must be greater than zero"))]
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_dto_accepts_missing_bid_id() {
        let dto: CreatePaymentDto = serde_json::from_value(serde_json::json!({
            "student_id": Uuid::new_v4(),
            "request_id": Uuid::new_v4(),
            "payment_method": "IBAN",
            "payment_details": "GR16 0110 1250 0000 0001 2345 678",
            "instructions": "Include your student ID in the reference",
        }))
        .unwrap();
        assert!(dto.bid_id.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn payment_dto_rejects_empty_method() {
        let dto = CreatePaymentDto {
            student_id: Uuid::new_v4(),
            request_id: Uuid::new_v4(),
            bid_id: None,
            payment_method: String::new(),
            payment_details: "details".to_string(),
            instructions: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn price_dto_rejects_zero() {
        let dto = CreatePriceDto {
            request_id: Uuid::new_v4(),
            price: 0.0,
        };
        assert!(dto.validate().is_err());
    }
}
