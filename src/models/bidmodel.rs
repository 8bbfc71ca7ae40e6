use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "bid_status", rename_all = "snake_case")]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
}

impl BidStatus {
    pub fn to_str(&self) -> &str {
        match self {
            BidStatus::Pending => "pending",
            BidStatus::Accepted => "accepted",
            BidStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(BidStatus::Pending),
            "accepted" => Some(BidStatus::Accepted),
            "rejected" => Some(BidStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Bid {
    pub id: uuid::Uuid,
    pub supervisor_id: uuid::Uuid,
    pub request_id: uuid::Uuid,
    pub price: f64,
    pub estimated_completion: DateTime<Utc>,
    pub proposal: String,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_known_status_values_parse() {
        assert_eq!(BidStatus::from_str("accepted"), Some(BidStatus::Accepted));
        assert_eq!(BidStatus::from_str("withdrawn"), None);
        assert_eq!(BidStatus::from_str("Pending"), None);
    }
}
