use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::{paymentmodel::PaymentInfo, requestmodel::RequestStatus};

#[async_trait]
pub trait PaymentExt {
    async fn save_payment(
        &self,
        student_id: Uuid,
        request_id: Uuid,
        bid_id: Option<String>,
        payment_method: &str,
        payment_details: &str,
        instructions: Option<String>,
        created_by_admin: Uuid,
    ) -> Result<PaymentInfo, sqlx::Error>;

    async fn get_payment(&self, payment_id: Uuid) -> Result<Option<PaymentInfo>, sqlx::Error>;

    async fn get_payment_by_request(
        &self,
        request_id: Uuid,
    ) -> Result<Option<PaymentInfo>, sqlx::Error>;

    async fn get_payments_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<PaymentInfo>, sqlx::Error>;

    async fn get_payment_by_bid(&self, bid_id: &str)
        -> Result<Option<PaymentInfo>, sqlx::Error>;

    /// Approval cascade: the payment flips to approved with an audit trail,
    /// and the request takes the transition the workflow computed, in one
    /// transaction.
    async fn approve_payment(
        &self,
        payment_id: Uuid,
        admin_id: Uuid,
        request_id: Uuid,
        request_status: RequestStatus,
        assigned_supervisor: Option<Uuid>,
    ) -> Result<PaymentInfo, sqlx::Error>;

    async fn update_payment(
        &self,
        payment_id: Uuid,
        bid_id: Option<String>,
        payment_method: &str,
        payment_details: &str,
        instructions: Option<String>,
    ) -> Result<Option<PaymentInfo>, sqlx::Error>;

    async fn delete_payment(&self, payment_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl PaymentExt for DBClient {
    async fn save_payment(
        &self,
        student_id: Uuid,
        request_id: Uuid,
        bid_id: Option<String>,
        payment_method: &str,
        payment_details: &str,
        instructions: Option<String>,
        created_by_admin: Uuid,
    ) -> Result<PaymentInfo, sqlx::Error> {
        sqlx::query_as::<_, PaymentInfo>(
            r#"
            INSERT INTO payment_info
                (student_id, request_id, bid_id, payment_method, payment_details, instructions, created_by_admin)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, student_id, request_id, bid_id, payment_method, payment_details,
                      instructions, status, created_by_admin, approved_by, approved_at, created_at
            "#,
        )
        .bind(student_id)
        .bind(request_id)
        .bind(bid_id)
        .bind(payment_method)
        .bind(payment_details)
        .bind(instructions)
        .bind(created_by_admin)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_payment(&self, payment_id: Uuid) -> Result<Option<PaymentInfo>, sqlx::Error> {
        sqlx::query_as::<_, PaymentInfo>(
            r#"
            SELECT id, student_id, request_id, bid_id, payment_method, payment_details,
                   instructions, status, created_by_admin, approved_by, approved_at, created_at
            FROM payment_info
            WHERE id = $1
            "#,
        )
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_payment_by_request(
        &self,
        request_id: Uuid,
    ) -> Result<Option<PaymentInfo>, sqlx::Error> {
        sqlx::query_as::<_, PaymentInfo>(
            r#"
            SELECT id, student_id, request_id, bid_id, payment_method, payment_details,
                   instructions, status, created_by_admin, approved_by, approved_at, created_at
            FROM payment_info
            WHERE request_id = $1
            "#,
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_payments_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<PaymentInfo>, sqlx::Error> {
        sqlx::query_as::<_, PaymentInfo>(
            r#"
            SELECT id, student_id, request_id, bid_id, payment_method, payment_details,
                   instructions, status, created_by_admin, approved_by, approved_at, created_at
            FROM payment_info
            WHERE student_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_payment_by_bid(
        &self,
        bid_id: &str,
    ) -> Result<Option<PaymentInfo>, sqlx::Error> {
        sqlx::query_as::<_, PaymentInfo>(
            r#"
            SELECT id, student_id, request_id, bid_id, payment_method, payment_details,
                   instructions, status, created_by_admin, approved_by, approved_at, created_at
            FROM payment_info
            WHERE bid_id = $1
            "#,
        )
        .bind(bid_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn approve_payment(
        &self,
        payment_id: Uuid,
        admin_id: Uuid,
        request_id: Uuid,
        request_status: RequestStatus,
        assigned_supervisor: Option<Uuid>,
    ) -> Result<PaymentInfo, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let payment = sqlx::query_as::<_, PaymentInfo>(
            r#"
            UPDATE payment_info
            SET status = 'approved'::payment_status, approved_by = $2, approved_at = NOW()
            WHERE id = $1
            RETURNING id, student_id, request_id, bid_id, payment_method, payment_details,
                      instructions, status, created_by_admin, approved_by, approved_at, created_at
            "#,
        )
        .bind(payment_id)
        .bind(admin_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE essay_requests
            SET status = $2, assigned_supervisor = $3
            WHERE id = $1
            "#,
        )
        .bind(request_id)
        .bind(request_status)
        .bind(assigned_supervisor)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(payment)
    }

    async fn update_payment(
        &self,
        payment_id: Uuid,
        bid_id: Option<String>,
        payment_method: &str,
        payment_details: &str,
        instructions: Option<String>,
    ) -> Result<Option<PaymentInfo>, sqlx::Error> {
        sqlx::query_as::<_, PaymentInfo>(
            r#"
            UPDATE payment_info
            SET bid_id = $2, payment_method = $3, payment_details = $4, instructions = $5
            WHERE id = $1
            RETURNING id, student_id, request_id, bid_id, payment_method, payment_details,
                      instructions, status, created_by_admin, approved_by, approved_at, created_at
            "#,
        )
        .bind(payment_id)
        .bind(bid_id)
        .bind(payment_method)
        .bind(payment_details)
        .bind(instructions)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_payment(&self, payment_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM payment_info WHERE id = $1")
            .bind(payment_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
