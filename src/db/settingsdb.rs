use async_trait::async_trait;

use super::db::DBClient;
use crate::models::settingsmodel::SystemSettings;

#[async_trait]
pub trait SettingsExt {
    /// Returns the single settings row, creating it with defaults on first use.
    async fn get_settings(&self) -> Result<SystemSettings, sqlx::Error>;

    async fn update_settings(
        &self,
        site_title: Option<&str>,
        login_title: Option<&str>,
        site_description: Option<&str>,
        header_color: Option<&str>,
        meta_keywords: Option<&str>,
        system_language: Option<&str>,
    ) -> Result<SystemSettings, sqlx::Error>;
}

#[async_trait]
impl SettingsExt for DBClient {
    async fn get_settings(&self) -> Result<SystemSettings, sqlx::Error> {
        let settings = sqlx::query_as::<_, SystemSettings>(
            r#"
            SELECT id, site_title, login_title, site_description, header_color,
                   meta_keywords, system_language, updated_at
            FROM system_settings
            ORDER BY updated_at ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        if let Some(settings) = settings {
            return Ok(settings);
        }

        sqlx::query_as::<_, SystemSettings>(
            r#"
            INSERT INTO system_settings (site_title, login_title, site_description, header_color, meta_keywords, system_language)
            VALUES (
                'Essay Bid Submission System',
                'Essay Bid Submission System',
                'Professional essay writing and bidding platform',
                '#1e3a8a',
                'essay, writing, academic, bidding, students, supervisors',
                'en'
            )
            RETURNING id, site_title, login_title, site_description, header_color,
                      meta_keywords, system_language, updated_at
            "#,
        )
        .fetch_one(&self.pool)
        .await
    }

    async fn update_settings(
        &self,
        site_title: Option<&str>,
        login_title: Option<&str>,
        site_description: Option<&str>,
        header_color: Option<&str>,
        meta_keywords: Option<&str>,
        system_language: Option<&str>,
    ) -> Result<SystemSettings, sqlx::Error> {
        // Make sure the row exists before the partial update.
        let current = self.get_settings().await?;

        sqlx::query_as::<_, SystemSettings>(
            r#"
            UPDATE system_settings
            SET site_title = COALESCE($2, site_title),
                login_title = COALESCE($3, login_title),
                site_description = COALESCE($4, site_description),
                header_color = COALESCE($5, header_color),
                meta_keywords = COALESCE($6, meta_keywords),
                system_language = COALESCE($7, system_language),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, site_title, login_title, site_description, header_color,
                      meta_keywords, system_language, updated_at
            "#,
        )
        .bind(current.id)
        .bind(site_title)
        .bind(login_title)
        .bind(site_description)
        .bind(header_color)
        .bind(meta_keywords)
        .bind(system_language)
        .fetch_one(&self.pool)
        .await
    }
}
