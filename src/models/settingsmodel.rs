use chrono::prelude::*;
use serde::{Deserialize, Serialize};

// Single-row table; the row is created on first read with these defaults.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct SystemSettings {
    pub id: uuid::Uuid,
    pub site_title: String,
    pub login_title: String,
    pub site_description: String,
    pub header_color: String,
    pub meta_keywords: String,
    pub system_language: String,
    pub updated_at: DateTime<Utc>,
}
