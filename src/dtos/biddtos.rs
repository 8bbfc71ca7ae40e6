use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateBidDto {
    pub request_id: Uuid,

    #[validate(range(min = 0.01, message = "Price must be greater than zero"))]
    pub price: f64,

    pub estimated_completion: DateTime<Utc>,

    #[validate(length(min = 1, message = "Proposal is required"))]
    pub proposal: String,
}

/// `status_value` arrives as a query parameter and is validated against the
/// bid status enum in the handler so unknown values turn into a 400.
#[derive(Debug, Serialize, Deserialize)]
pub struct BidStatusQueryDto {
    pub status_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_price() {
        let dto = CreateBidDto {
            request_id: Uuid::new_v4(),
            price: 0.0,
            estimated_completion: Utc::now(),
            proposal: "I can deliver this in a week".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_empty_proposal() {
        let dto = CreateBidDto {
            request_id: Uuid::new_v4(),
            price: 150.0,
            estimated_completion: Utc::now(),
            proposal: String::new(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn accepts_valid_bid() {
        let dto = CreateBidDto {
            request_id: Uuid::new_v4(),
            price: 150.0,
            estimated_completion: Utc::now(),
            proposal: "Draft in five days, revisions included".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
