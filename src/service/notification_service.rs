use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, userdb::UserExt},
    models::{notificationmodel::Notification, usermodel::UserRole},
    service::error::ServiceError,
};

/// The only writer of the notifications table. Handlers report domain events
/// through the `notify_*` methods; fan-out to whole roles happens here so the
/// lifecycle rules never touch the sink.
#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// A student opened a new request; every supervisor hears about it.
    pub async fn notify_new_request(&self, request_title: &str) -> Result<(), ServiceError> {
        tracing::info!("New request notification: {}", request_title);

        let supervisors = self.db_client.get_users_by_role(UserRole::Supervisor).await?;
        for supervisor in supervisors {
            self.store_notification(
                supervisor.id,
                "New Essay Request",
                format!("New essay request: {}", request_title),
                "new_request",
            )
            .await?;
        }

        Ok(())
    }

    pub async fn notify_assignment(&self, supervisor_id: Uuid) -> Result<(), ServiceError> {
        tracing::info!("Assignment notification: supervisor {}", supervisor_id);

        self.store_notification(
            supervisor_id,
            "New Assignment",
            "You have been assigned a new essay request".to_string(),
            "assignment",
        )
        .await
    }

    /// Bids are hidden from students, so only admins hear about new ones.
    pub async fn notify_bid_submitted(
        &self,
        supervisor_name: &str,
        request_title: &str,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "Bid notification: {} bid on '{}'",
            supervisor_name,
            request_title
        );

        let admins = self.db_client.get_users_by_role(UserRole::Admin).await?;
        for admin in admins {
            self.store_notification(
                admin.id,
                "New Bid Submitted",
                format!(
                    "New bid submitted by {} for '{}'",
                    supervisor_name, request_title
                ),
                "bid_submitted",
            )
            .await?;
        }

        Ok(())
    }

    pub async fn notify_bid_status(
        &self,
        supervisor_id: Uuid,
        status: &str,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "Bid status notification: supervisor {} bid {}",
            supervisor_id,
            status
        );

        self.store_notification(
            supervisor_id,
            "Bid Status Updated",
            format!("Your bid has been {}", status),
            "bid_status_update",
        )
        .await
    }

    pub async fn notify_admin_price(
        &self,
        student_id: Uuid,
        price: f64,
        request_title: &str,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "Price notification: student {} quoted ${} for '{}'",
            student_id,
            price,
            request_title
        );

        self.store_notification(
            student_id,
            "Admin Set Price",
            format!(
                "Admin set price ${} for your request: {}",
                price, request_title
            ),
            "admin_price",
        )
        .await
    }

    pub async fn notify_payment_info(
        &self,
        student_id: Uuid,
        request_title: &str,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "Payment info notification: student {} for '{}'",
            student_id,
            request_title
        );

        self.store_notification(
            student_id,
            "Payment Information Added",
            format!(
                "Payment information has been added for your request: {}",
                request_title
            ),
            "payment_info",
        )
        .await
    }

    pub async fn notify_payment_approved(
        &self,
        student_id: Uuid,
        request_title: &str,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "Payment approval notification: student {} for '{}'",
            student_id,
            request_title
        );

        self.store_notification(
            student_id,
            "Payment Approved",
            format!("Your payment for '{}' has been approved", request_title),
            "payment_approved",
        )
        .await
    }

    /// Chat is moderated; admins get pinged whenever a message enters the queue.
    pub async fn notify_message_needs_approval(
        &self,
        sender_name: &str,
        request_title: &str,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "Moderation notification: message from {} for '{}'",
            sender_name,
            request_title
        );

        let admins = self.db_client.get_users_by_role(UserRole::Admin).await?;
        for admin in admins {
            self.store_notification(
                admin.id,
                "Message Needs Approval",
                format!(
                    "New message from {} needs approval for request: {}",
                    sender_name, request_title
                ),
                "message_approval",
            )
            .await?;
        }

        Ok(())
    }

    pub async fn notify_message_approved(&self, receiver_id: Uuid) -> Result<(), ServiceError> {
        tracing::info!("Message approved notification: receiver {}", receiver_id);

        self.store_notification(
            receiver_id,
            "New Message",
            "You have a new message in your chat".to_string(),
            "message_approved",
        )
        .await
    }

    async fn store_notification(
        &self,
        user_id: Uuid,
        title: &str,
        message: String,
        notification_type: &str,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, title, message, type)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(message)
        .bind(notification_type)
        .execute(&self.db_client.pool)
        .await?;

        Ok(())
    }

    pub async fn get_user_notifications(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, ServiceError> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, title, message, type, read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db_client.pool)
        .await?;

        Ok(notifications)
    }

    /// Scoped to the owner; marking someone else's notification is a no-op.
    pub async fn mark_notification_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            UPDATE notifications
            SET read = true
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(&self.db_client.pool)
        .await?;

        Ok(())
    }
}
