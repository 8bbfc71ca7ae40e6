use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::{
    bidmodel::{Bid, BidStatus},
    requestmodel::RequestStatus,
};

#[async_trait]
pub trait BidExt {
    async fn save_bid(
        &self,
        supervisor_id: Uuid,
        request_id: Uuid,
        price: f64,
        estimated_completion: DateTime<Utc>,
        proposal: &str,
    ) -> Result<Bid, sqlx::Error>;

    async fn get_bid(&self, bid_id: Uuid) -> Result<Option<Bid>, sqlx::Error>;

    async fn get_bids_by_supervisor(&self, supervisor_id: Uuid) -> Result<Vec<Bid>, sqlx::Error>;

    async fn get_all_bids(&self) -> Result<Vec<Bid>, sqlx::Error>;

    async fn get_bids_for_request(&self, request_id: Uuid) -> Result<Vec<Bid>, sqlx::Error>;

    async fn set_bid_status(&self, bid_id: Uuid, status: BidStatus)
        -> Result<Bid, sqlx::Error>;

    /// The accepted-bid cascade: the winning bid flips to accepted, every
    /// sibling bid is rejected, and the request takes the transition the
    /// workflow computed. One transaction so no partial winner is visible.
    async fn accept_bid(
        &self,
        bid_id: Uuid,
        request_id: Uuid,
        request_status: RequestStatus,
        assigned_supervisor: Option<Uuid>,
    ) -> Result<Bid, sqlx::Error>;
}

#[async_trait]
impl BidExt for DBClient {
    async fn save_bid(
        &self,
        supervisor_id: Uuid,
        request_id: Uuid,
        price: f64,
        estimated_completion: DateTime<Utc>,
        proposal: &str,
    ) -> Result<Bid, sqlx::Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            INSERT INTO bids (supervisor_id, request_id, price, estimated_completion, proposal)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, supervisor_id, request_id, price, estimated_completion,
                      proposal, status, created_at
            "#,
        )
        .bind(supervisor_id)
        .bind(request_id)
        .bind(price)
        .bind(estimated_completion)
        .bind(proposal)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_bid(&self, bid_id: Uuid) -> Result<Option<Bid>, sqlx::Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, supervisor_id, request_id, price, estimated_completion,
                   proposal, status, created_at
            FROM bids
            WHERE id = $1
            "#,
        )
        .bind(bid_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_bids_by_supervisor(&self, supervisor_id: Uuid) -> Result<Vec<Bid>, sqlx::Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, supervisor_id, request_id, price, estimated_completion,
                   proposal, status, created_at
            FROM bids
            WHERE supervisor_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(supervisor_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_all_bids(&self) -> Result<Vec<Bid>, sqlx::Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, supervisor_id, request_id, price, estimated_completion,
                   proposal, status, created_at
            FROM bids
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_bids_for_request(&self, request_id: Uuid) -> Result<Vec<Bid>, sqlx::Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, supervisor_id, request_id, price, estimated_completion,
                   proposal, status, created_at
            FROM bids
            WHERE request_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn set_bid_status(
        &self,
        bid_id: Uuid,
        status: BidStatus,
    ) -> Result<Bid, sqlx::Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            UPDATE bids
            SET status = $2
            WHERE id = $1
            RETURNING id, supervisor_id, request_id, price, estimated_completion,
                      proposal, status, created_at
            "#,
        )
        .bind(bid_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn accept_bid(
        &self,
        bid_id: Uuid,
        request_id: Uuid,
        request_status: RequestStatus,
        assigned_supervisor: Option<Uuid>,
    ) -> Result<Bid, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let bid = sqlx::query_as::<_, Bid>(
            r#"
            UPDATE bids
            SET status = 'accepted'::bid_status
            WHERE id = $1
            RETURNING id, supervisor_id, request_id, price, estimated_completion,
                      proposal, status, created_at
            "#,
        )
        .bind(bid_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE bids
            SET status = 'rejected'::bid_status
            WHERE request_id = $1 AND id <> $2
            "#,
        )
        .bind(request_id)
        .bind(bid_id)
        .execute(&mut *tx)
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

        Ok(bid)
    }
}
