//! Admin accounts and session repository

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::admin::{Admin, AdminSession},
};

#[derive(Clone)]
pub struct AdminsRepository {
    pool: Pool<Postgres>,
}

impl AdminsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get admin by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Admin> {
        sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Admin with id {} not found", id)))
    }

    /// Get admin by username (case-insensitive)
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT * FROM admins WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Count admin accounts
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a new admin account
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        full_name: Option<&str>,
    ) -> AppResult<Admin> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (username, password_hash, full_name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(full_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Create a session for an admin
    pub async fn create_session(
        &self,
        admin_id: i32,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<AdminSession> {
        let session = sqlx::query_as::<_, AdminSession>(
            r#"
            INSERT INTO admin_sessions (id, admin_id, token_hash, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(admin_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Look up a session by token hash
    pub async fn get_session(&self, token_hash: &str) -> AppResult<Option<AdminSession>> {
        let session = sqlx::query_as::<_, AdminSession>(
            "SELECT * FROM admin_sessions WHERE token_hash = $1",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Delete a session by token hash
    pub async fn delete_session(&self, token_hash: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM admin_sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Remove expired sessions
    pub async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> AppResult<i64> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() as i64)
    }
}
