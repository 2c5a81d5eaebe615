//! Settings repository

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::settings::{Settings, UpdateSettings},
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: Pool<Postgres>,
}

impl SettingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get the settings row, if one has been created
    pub async fn get(&self) -> AppResult<Option<Settings>> {
        let settings =
            sqlx::query_as::<_, Settings>("SELECT * FROM settings ORDER BY id LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(settings)
    }

    /// Apply an update, creating the singleton row on first write
    pub async fn upsert(&self, data: &UpdateSettings) -> AppResult<Settings> {
        // Try to update the existing row first
        let updated = sqlx::query_as::<_, Settings>(
            r#"
            UPDATE settings SET
                app_name = COALESCE($1, app_name),
                header_name = COALESCE($2, header_name),
                footer_name = COALESCE($3, footer_name),
                logo_data = COALESCE($4, logo_data),
                country_code = COALESCE($5, country_code),
                admin_theme = COALESCE($6, admin_theme),
                visitor_theme = COALESCE($7, visitor_theme),
                default_language = COALESCE($8, default_language)
            WHERE id = (SELECT id FROM settings ORDER BY id LIMIT 1)
            RETURNING *
            "#,
        )
        .bind(&data.app_name)
        .bind(&data.header_name)
        .bind(&data.footer_name)
        .bind(&data.logo_data)
        .bind(&data.country_code)
        .bind(&data.admin_theme)
        .bind(&data.visitor_theme)
        .bind(&data.default_language)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(settings) = updated {
            return Ok(settings);
        }

        // No row yet: create it, filling gaps from the compiled defaults
        let defaults = Settings::defaults();
        let settings = sqlx::query_as::<_, Settings>(
            r#"
            INSERT INTO settings (app_name, header_name, footer_name, logo_data, country_code, admin_theme, visitor_theme, default_language)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(data.app_name.as_ref().unwrap_or(&defaults.app_name))
        .bind(data.header_name.as_ref().or(defaults.header_name.as_ref()))
        .bind(data.footer_name.as_ref().or(defaults.footer_name.as_ref()))
        .bind(data.logo_data.as_ref().or(defaults.logo_data.as_ref()))
        .bind(data.country_code.as_ref().unwrap_or(&defaults.country_code))
        .bind(data.admin_theme.as_ref().unwrap_or(&defaults.admin_theme))
        .bind(data.visitor_theme.as_ref().unwrap_or(&defaults.visitor_theme))
        .bind(
            data.default_language
                .as_ref()
                .unwrap_or(&defaults.default_language),
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }
}
