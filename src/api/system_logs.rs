//! System log endpoints (admin)

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::system_log::{SystemLog, SystemLogQuery},
};

use super::AuthenticatedAdmin;

/// Paginated system log response
#[derive(Serialize, ToSchema)]
pub struct SystemLogsListResponse {
    pub logs: Vec<SystemLog>,
    pub total: i64,
}

/// List audit trail entries, newest first
#[utoipa::path(
    get,
    path = "/admin/system-logs",
    tag = "system-logs",
    security(("bearer_auth" = [])),
    params(SystemLogQuery),
    responses(
        (status = 200, description = "Audit trail entries", body = SystemLogsListResponse)
    )
)]
pub async fn list_system_logs(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Query(query): Query<SystemLogQuery>,
) -> AppResult<Json<SystemLogsListResponse>> {
    let (logs, total) = state.services.system_logs.list(&query).await?;
    Ok(Json(SystemLogsListResponse { logs, total }))
}
