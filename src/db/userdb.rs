use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::usermodel::{User, UserRole};

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn get_users(&self, page: u32, limit: usize) -> Result<Vec<User>, sqlx::Error>;

    async fn get_users_by_role(&self, role: UserRole) -> Result<Vec<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        email: T,
        name: T,
        password_hash: T,
        role: UserRole,
    ) -> Result<User, sqlx::Error>;

    async fn update_user<T: Into<String> + Send>(
        &self,
        user_id: Uuid,
        email: T,
        name: T,
        password_hash: T,
        role: UserRole,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn delete_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, email, name, role, password_hash, profile_pic, active, created_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, email, name, role, password_hash, profile_pic, active, created_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn get_users(&self, page: u32, limit: usize) -> Result<Vec<User>, sqlx::Error> {
        let offset = (page - 1) as i64 * limit as i64;

        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, role, password_hash, profile_pic, active, created_at
            FROM users
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_users_by_role(&self, role: UserRole) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, role, password_hash, profile_pic, active, created_at
            FROM users
            WHERE role = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        email: T,
        name: T,
        password_hash: T,
        role: UserRole,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, role, password_hash, profile_pic, active, created_at
            "#,
        )
        .bind(email.into())
        .bind(name.into())
        .bind(password_hash.into())
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user<T: Into<String> + Send>(
        &self,
        user_id: Uuid,
        email: T,
        name: T,
        password_hash: T,
        role: UserRole,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $2, name = $3, password_hash = $4, role = $5
            WHERE id = $1
            RETURNING id, email, name, role, password_hash, profile_pic, active, created_at
            "#,
        )
        .bind(user_id)
        .bind(email.into())
        .bind(name.into())
        .bind(password_hash.into())
        .bind(role)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
