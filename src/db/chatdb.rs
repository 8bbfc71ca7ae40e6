use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::chatmodel::ChatMessage;

#[async_trait]
pub trait ChatExt {
    async fn save_message(
        &self,
        request_id: Uuid,
        sender_id: Uuid,
        receiver_id: Uuid,
        message: &str,
    ) -> Result<ChatMessage, sqlx::Error>;

    async fn get_message(&self, message_id: Uuid) -> Result<Option<ChatMessage>, sqlx::Error>;

    /// Conversation for one request, oldest first. `approved_only` hides
    /// messages still waiting for moderation.
    async fn get_messages_for_request(
        &self,
        request_id: Uuid,
        approved_only: bool,
    ) -> Result<Vec<ChatMessage>, sqlx::Error>;

    async fn get_pending_messages(&self) -> Result<Vec<ChatMessage>, sqlx::Error>;

    async fn approve_message(
        &self,
        message_id: Uuid,
        admin_id: Uuid,
    ) -> Result<Option<ChatMessage>, sqlx::Error>;

    async fn delete_message(&self, message_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl ChatExt for DBClient {
    async fn save_message(
        &self,
        request_id: Uuid,
        sender_id: Uuid,
        receiver_id: Uuid,
        message: &str,
    ) -> Result<ChatMessage, sqlx::Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO chat_messages (request_id, sender_id, receiver_id, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, request_id, sender_id, receiver_id, message, read,
                      approved, approved_by, approved_at, timestamp
            "#,
        )
        .bind(request_id)
        .bind(sender_id)
        .bind(receiver_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_message(&self, message_id: Uuid) -> Result<Option<ChatMessage>, sqlx::Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, request_id, sender_id, receiver_id, message, read,
                   approved, approved_by, approved_at, timestamp
            FROM chat_messages
            WHERE id = $1
            "#,
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_messages_for_request(
        &self,
        request_id: Uuid,
        approved_only: bool,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, request_id, sender_id, receiver_id, message, read,
                   approved, approved_by, approved_at, timestamp
            FROM chat_messages
            WHERE request_id = $1
              AND ($2 = FALSE OR approved = TRUE)
            ORDER BY timestamp ASC
            "#,
        )
        .bind(request_id)
        .bind(approved_only)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_pending_messages(&self) -> Result<Vec<ChatMessage>, sqlx::Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, request_id, sender_id, receiver_id, message, read,
                   approved, approved_by, approved_at, timestamp
            FROM chat_messages
            WHERE approved = FALSE
            ORDER BY timestamp ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn approve_message(
        &self,
        message_id: Uuid,
        admin_id: Uuid,
    ) -> Result<Option<ChatMessage>, sqlx::Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            UPDATE chat_messages
            SET approved = TRUE, approved_by = $2, approved_at = NOW()
            WHERE id = $1
            RETURNING id, request_id, sender_id, receiver_id, message, read,
                      approved, approved_by, approved_at, timestamp
            "#,
        )
        .bind(message_id)
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_message(&self, message_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE id = $1")
            .bind(message_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
