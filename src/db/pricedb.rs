use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::paymentmodel::AdminPrice;

#[async_trait]
pub trait PriceExt {
    async fn save_price(
        &self,
        request_id: Uuid,
        price: f64,
        set_by_admin: Uuid,
    ) -> Result<AdminPrice, sqlx::Error>;

    async fn get_all_prices(&self) -> Result<Vec<AdminPrice>, sqlx::Error>;

    /// Quotes attached to one request, newest first. Only rows flagged
    /// visible to students are returned; hidden drafts stay admin-side.
    async fn get_prices_for_request(
        &self,
        request_id: Uuid,
    ) -> Result<Vec<AdminPrice>, sqlx::Error>;

    async fn delete_price(&self, price_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl PriceExt for DBClient {
    async fn save_price(
        &self,
        request_id: Uuid,
        price: f64,
        set_by_admin: Uuid,
    ) -> Result<AdminPrice, sqlx::Error> {
        sqlx::query_as::<_, AdminPrice>(
            r#"
            INSERT INTO admin_prices (request_id, price, set_by_admin)
            VALUES ($1, $2, $3)
            RETURNING id, request_id, price, set_by_admin, visible_to_student, created_at
            "#,
        )
        .bind(request_id)
        .bind(price)
        .bind(set_by_admin)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_all_prices(&self) -> Result<Vec<AdminPrice>, sqlx::Error> {
        sqlx::query_as::<_, AdminPrice>(
            r#"
            SELECT id, request_id, price, set_by_admin, visible_to_student, created_at
            FROM admin_prices
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_prices_for_request(
        &self,
        request_id: Uuid,
    ) -> Result<Vec<AdminPrice>, sqlx::Error> {
        sqlx::query_as::<_, AdminPrice>(
            r#"
            SELECT id, request_id, price, set_by_admin, visible_to_student, created_at
            FROM admin_prices
            WHERE request_id = $1 AND visible_to_student = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_price(&self, price_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admin_prices WHERE id = $1")
            .bind(price_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
