//! Append-only audit trail entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Audit trail entry for significant automated or bulk actions
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SystemLog {
    pub id: i32,
    pub action: String,
    pub details: String,
    /// Acting admin, absent for scheduled actions
    pub admin_id: Option<i32>,
    pub affected_count: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// New audit trail entry
#[derive(Debug, Clone)]
pub struct CreateSystemLog {
    pub action: String,
    pub details: String,
    pub admin_id: Option<i32>,
    pub affected_count: Option<i32>,
}

/// System log query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SystemLogQuery {
    pub action: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
