use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ChatMessage {
    pub id: uuid::Uuid,
    pub request_id: uuid::Uuid,
    pub sender_id: uuid::Uuid,
    pub receiver_id: uuid::Uuid,
    pub message: String,
    pub read: bool,
    // Messages stay invisible to the participants until an admin approves.
    pub approved: bool,
    pub approved_by: Option<uuid::Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
}
