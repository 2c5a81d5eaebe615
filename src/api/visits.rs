//! Visit management endpoints (admin)

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::visit::{CheckOutRequest, SetPartnerRequest, Visit, VisitDetails, VisitQuery},
};

use super::AuthenticatedAdmin;

/// Paginated visits response
#[derive(Serialize, ToSchema)]
pub struct VisitsListResponse {
    pub visits: Vec<VisitDetails>,
    pub total: i64,
}

/// Bulk checkout response
#[derive(Serialize, ToSchema)]
pub struct AutoCheckoutResponse {
    /// Number of visits transitioned to Completed
    pub checked_out: i64,
}

/// List visits with visitor context
#[utoipa::path(
    get,
    path = "/admin/visits",
    tag = "visits",
    security(("bearer_auth" = [])),
    params(VisitQuery),
    responses(
        (status = 200, description = "Visits list", body = VisitsListResponse)
    )
)]
pub async fn list_visits(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Query(query): Query<VisitQuery>,
) -> AppResult<Json<VisitsListResponse>> {
    let (visits, total) = state.services.visits.list(&query).await?;
    Ok(Json(VisitsListResponse { visits, total }))
}

/// Force-close a single visit
#[utoipa::path(
    post,
    path = "/admin/check-out-visitor",
    tag = "visits",
    security(("bearer_auth" = [])),
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Visit checked out", body = Visit),
        (status = 400, description = "Visit is not active"),
        (status = 404, description = "Visit not found")
    )
)]
pub async fn check_out_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Json(request): Json<CheckOutRequest>,
) -> AppResult<Json<Visit>> {
    let visit = state.services.visits.check_out(request.visit_id).await?;
    Ok(Json(visit))
}

/// Force-close every active visit
#[utoipa::path(
    post,
    path = "/admin/auto-checkout",
    tag = "visits",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active visits closed", body = AutoCheckoutResponse)
    )
)]
pub async fn auto_checkout(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(admin): AuthenticatedAdmin,
) -> AppResult<Json<AutoCheckoutResponse>> {
    let checked_out = state
        .services
        .visits
        .auto_checkout(Some(admin.admin_id))
        .await?;
    Ok(Json(AutoCheckoutResponse { checked_out }))
}

/// Set or clear the mutual partner link between two visits
#[utoipa::path(
    post,
    path = "/admin/set-visit-partner",
    tag = "visits",
    security(("bearer_auth" = [])),
    request_body = SetPartnerRequest,
    responses(
        (status = 200, description = "Partner link updated", body = Visit),
        (status = 404, description = "Visit not found")
    )
)]
pub async fn set_visit_partner(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Json(request): Json<SetPartnerRequest>,
) -> AppResult<Json<Visit>> {
    let visit = state
        .services
        .visits
        .set_partner(request.visit_id, request.partner_id)
        .await?;
    Ok(Json(visit))
}
