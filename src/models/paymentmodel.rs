use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Approved,
}

impl PaymentStatus {
    pub fn to_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Approved => "approved",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct AdminPrice {
    pub id: uuid::Uuid,
    pub request_id: uuid::Uuid,
    pub price: f64,
    pub set_by_admin: uuid::Uuid,
    pub visible_to_student: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct PaymentInfo {
    pub id: uuid::Uuid,
    pub student_id: uuid::Uuid,
    pub request_id: uuid::Uuid,
    // Free-form so records created before the bidding flow keep working.
    pub bid_id: Option<String>,
    pub payment_method: String,
    pub payment_details: String,
    pub instructions: Option<String>,
    pub status: PaymentStatus,
    pub created_by_admin: uuid::Uuid,
    pub approved_by: Option<uuid::Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
