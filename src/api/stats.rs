//! Dashboard statistics endpoint (admin)

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::AuthenticatedAdmin;

/// Visitor counters
#[derive(Serialize, ToSchema)]
pub struct VisitorStats {
    pub total: i64,
    pub verified: i64,
    pub trashed: i64,
}

/// Visit counters
#[derive(Serialize, ToSchema)]
pub struct VisitStats {
    pub active: i64,
    /// Visits opened since local midnight
    pub today: i64,
    pub total: i64,
}

/// Report counters
#[derive(Serialize, ToSchema)]
pub struct ReportStats {
    pub unresolved: i64,
}

/// Aggregate dashboard statistics
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub visitors: VisitorStats,
    pub visits: VisitStats,
    pub reports: ReportStats,
}

/// Get dashboard statistics
#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
