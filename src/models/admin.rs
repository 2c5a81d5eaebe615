//! Admin account and session models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Admin account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Admin {
    pub id: i32,
    pub username: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Server-side session backing an admin's bearer token
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub id: Uuid,
    pub admin_id: i32,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Authenticated admin identity attached to a request
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub admin_id: i32,
    pub username: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
