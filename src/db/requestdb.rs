use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::requestmodel::{EssayRequest, RequestStatus};

#[async_trait]
pub trait RequestExt {
    async fn save_request(
        &self,
        student_id: Uuid,
        title: &str,
        due_date: DateTime<Utc>,
        word_count: i32,
        assignment_type: &str,
        field_of_study: &str,
        attachments: Vec<String>,
        extra_information: Option<String>,
    ) -> Result<EssayRequest, sqlx::Error>;

    async fn get_request(&self, request_id: Uuid) -> Result<Option<EssayRequest>, sqlx::Error>;

    /// Role-scoped listing. `student_id`/`status` narrow the base set,
    /// `search` matches a case-insensitive substring of title, field of
    /// study or assignment type, `category` matches field_of_study exactly.
    async fn get_requests(
        &self,
        student_id: Option<Uuid>,
        status: Option<RequestStatus>,
        search: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<EssayRequest>, sqlx::Error>;

    /// Accepted requests that have a supervisor, optionally narrowed to one
    /// student's requests or one supervisor's assignments.
    async fn get_assigned_requests(
        &self,
        student_id: Option<Uuid>,
        supervisor_id: Option<Uuid>,
    ) -> Result<Vec<EssayRequest>, sqlx::Error>;

    async fn update_request(
        &self,
        request_id: Uuid,
        title: &str,
        due_date: DateTime<Utc>,
        word_count: i32,
        assignment_type: &str,
        field_of_study: &str,
        attachments: Vec<String>,
        extra_information: Option<String>,
    ) -> Result<Option<EssayRequest>, sqlx::Error>;

    /// The only writer of `status` and `assigned_supervisor`. Values come
    /// from `service::workflow::transition`.
    async fn apply_transition(
        &self,
        request_id: Uuid,
        status: RequestStatus,
        assigned_supervisor: Option<Uuid>,
    ) -> Result<Option<EssayRequest>, sqlx::Error>;

    /// Deletes the request together with its bids, prices, payment record
    /// and chat messages in one transaction. Returns how many request rows
    /// went away, so callers can distinguish a miss.
    async fn delete_request_cascade(&self, request_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl RequestExt for DBClient {
    async fn save_request(
        &self,
        student_id: Uuid,
        title: &str,
        due_date: DateTime<Utc>,
        word_count: i32,
        assignment_type: &str,
        field_of_study: &str,
        attachments: Vec<String>,
        extra_information: Option<String>,
    ) -> Result<EssayRequest, sqlx::Error> {
        sqlx::query_as::<_, EssayRequest>(
            r#"
            INSERT INTO essay_requests
                (student_id, title, due_date, word_count, assignment_type, field_of_study, attachments, extra_information)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, student_id, title, due_date, word_count, assignment_type,
                      field_of_study, attachments, extra_information, status,
                      assigned_supervisor, created_at
            "#,
        )
        .bind(student_id)
        .bind(title)
        .bind(due_date)
        .bind(word_count)
        .bind(assignment_type)
        .bind(field_of_study)
        .bind(attachments)
        .bind(extra_information)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_request(&self, request_id: Uuid) -> Result<Option<EssayRequest>, sqlx::Error> {
        sqlx::query_as::<_, EssayRequest>(
            r#"
            SELECT id, student_id, title, due_date, word_count, assignment_type,
                   field_of_study, attachments, extra_information, status,
                   assigned_supervisor, created_at
            FROM essay_requests
            WHERE id = $1
            "#,
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_requests(
        &self,
        student_id: Option<Uuid>,
        status: Option<RequestStatus>,
        search: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<EssayRequest>, sqlx::Error> {
        sqlx::query_as::<_, EssayRequest>(
            r#"
            SELECT id, student_id, title, due_date, word_count, assignment_type,
                   field_of_study, attachments, extra_information, status,
                   assigned_supervisor, created_at
            FROM essay_requests
            WHERE ($1::uuid IS NULL OR student_id = $1)
              AND ($2::request_status IS NULL OR status = $2)
              AND ($3::text IS NULL
                   OR title ILIKE '%' || $3 || '%'
                   OR field_of_study ILIKE '%' || $3 || '%'
                   OR assignment_type ILIKE '%' || $3 || '%')
              AND ($4::text IS NULL OR field_of_study = $4)
            ORDER BY created_at DESC
            "#,
        )
        .bind(student_id)
        .bind(status)
        .bind(search)
        .bind(category)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_assigned_requests(
        &self,
        student_id: Option<Uuid>,
        supervisor_id: Option<Uuid>,
    ) -> Result<Vec<EssayRequest>, sqlx::Error> {
        sqlx::query_as::<_, EssayRequest>(
            r#"
            SELECT id, student_id, title, due_date, word_count, assignment_type,
                   field_of_study, attachments, extra_information, status,
                   assigned_supervisor, created_at
            FROM essay_requests
            WHERE status = 'accepted'::request_status
              AND assigned_supervisor IS NOT NULL
              AND ($1::uuid IS NULL OR student_id = $1)
              AND ($2::uuid IS NULL OR assigned_supervisor = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(student_id)
        .bind(supervisor_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_request(
        &self,
        request_id: Uuid,
        title: &str,
        due_date: DateTime<Utc>,
        word_count: i32,
        assignment_type: &str,
        field_of_study: &str,
        attachments: Vec<String>,
        extra_information: Option<String>,
    ) -> Result<Option<EssayRequest>, sqlx::Error> {
        sqlx::query_as::<_, EssayRequest>(
            r#"
            UPDATE essay_requests
            SET title = $2, due_date = $3, word_count = $4, assignment_type = $5,
                field_of_study = $6, attachments = $7, extra_information = $8
            WHERE id = $1
            RETURNING id, student_id, title, due_date, word_count, assignment_type,
                      field_of_study, attachments, extra_information, status,
                      assigned_supervisor, created_at
            "#,
        )
        .bind(request_id)
        .bind(title)
        .bind(due_date)
        .bind(word_count)
        .bind(assignment_type)
        .bind(field_of_study)
        .bind(attachments)
        .bind(extra_information)
        .fetch_optional(&self.pool)
        .await
    }

    async fn apply_transition(
        &self,
        request_id: Uuid,
        status: RequestStatus,
        assigned_supervisor: Option<Uuid>,
    ) -> Result<Option<EssayRequest>, sqlx::Error> {
        sqlx::query_as::<_, EssayRequest>(
            r#"
            UPDATE essay_requests
            SET status = $2, assigned_supervisor = $3
            WHERE id = $1
            RETURNING id, student_id, title, due_date, word_count, assignment_type,
                      field_of_study, attachments, extra_information, status,
                      assigned_supervisor, created_at
            "#,
        )
        .bind(request_id)
        .bind(status)
        .bind(assigned_supervisor)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_request_cascade(&self, request_id: Uuid) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM bids WHERE request_id = $1")
            .bind(request_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM admin_prices WHERE request_id = $1")
            .bind(request_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM payment_info WHERE request_id = $1")
            .bind(request_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM chat_messages WHERE request_id = $1")
            .bind(request_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM essay_requests WHERE id = $1")
            .bind(request_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected())
    }
}
