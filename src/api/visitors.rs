//! Visitor management endpoints (admin)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::visitor::{UpdateVisitor, VerifyVisitorRequest, Visitor, VisitorQuery},
};

use super::AuthenticatedAdmin;

/// Paginated visitors response
#[derive(Serialize, ToSchema)]
pub struct VisitorsListResponse {
    pub visitors: Vec<Visitor>,
    pub total: i64,
}

/// Empty-bin response
#[derive(Serialize, ToSchema)]
pub struct EmptyBinResponse {
    /// Number of visitors permanently removed
    pub deleted: i64,
}

/// List visitors with search and pagination
#[utoipa::path(
    get,
    path = "/admin/visitors",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(VisitorQuery),
    responses(
        (status = 200, description = "Visitors list", body = VisitorsListResponse)
    )
)]
pub async fn list_visitors(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Query(query): Query<VisitorQuery>,
) -> AppResult<Json<VisitorsListResponse>> {
    let (visitors, total) = state.services.visitors.search(&query).await?;
    Ok(Json(VisitorsListResponse { visitors, total }))
}

/// Get visitor by ID
#[utoipa::path(
    get,
    path = "/admin/visitors/{id}",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Visitor ID")),
    responses(
        (status = 200, description = "Visitor details", body = Visitor),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn get_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Path(id): Path<i32>,
) -> AppResult<Json<Visitor>> {
    let visitor = state.services.visitors.get_by_id(id).await?;
    Ok(Json(visitor))
}

/// Update a visitor's details
#[utoipa::path(
    put,
    path = "/admin/visitors/{id}",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Visitor ID")),
    request_body = UpdateVisitor,
    responses(
        (status = 200, description = "Visitor updated", body = Visitor),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn update_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Path(id): Path<i32>,
    Json(request): Json<UpdateVisitor>,
) -> AppResult<Json<Visitor>> {
    request.validate()?;

    let visitor = state.services.visitors.update(id, &request).await?;
    Ok(Json(visitor))
}

/// Set the verified trust marker on a visitor
#[utoipa::path(
    post,
    path = "/admin/verify-visitor",
    tag = "visitors",
    security(("bearer_auth" = [])),
    request_body = VerifyVisitorRequest,
    responses(
        (status = 200, description = "Visitor updated", body = Visitor),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn verify_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Json(request): Json<VerifyVisitorRequest>,
) -> AppResult<Json<Visitor>> {
    let visitor = state
        .services
        .visitors
        .set_verified(request.visitor_id, request.verified)
        .await?;
    Ok(Json(visitor))
}

/// List trashed visitors
#[utoipa::path(
    get,
    path = "/admin/trash",
    tag = "visitors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Trashed visitors", body = Vec<Visitor>)
    )
)]
pub async fn list_trash(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
) -> AppResult<Json<Vec<Visitor>>> {
    let visitors = state.services.visitors.list_trashed().await?;
    Ok(Json(visitors))
}

/// Move a visitor to the trash
#[utoipa::path(
    delete,
    path = "/admin/delete-visitor/{id}",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Visitor ID")),
    responses(
        (status = 204, description = "Visitor trashed"),
        (status = 400, description = "Visitor has an active visit"),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn delete_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if !state.services.visitors.delete(id).await? {
        return Err(AppError::InvalidState(
            "Visitor has an active visit and cannot be deleted".to_string(),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Restore a trashed visitor
#[utoipa::path(
    post,
    path = "/admin/restore-visitor/{id}",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Visitor ID")),
    responses(
        (status = 200, description = "Visitor restored", body = Visitor),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn restore_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Path(id): Path<i32>,
) -> AppResult<Json<Visitor>> {
    let visitor = state.services.visitors.restore(id).await?;
    Ok(Json(visitor))
}

/// Permanently delete a visitor and all their visits
#[utoipa::path(
    delete,
    path = "/admin/permanently-delete/{id}",
    tag = "visitors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Visitor ID")),
    responses(
        (status = 204, description = "Visitor permanently deleted"),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn permanently_delete_visitor(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.visitors.permanently_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Permanently delete every trashed visitor
#[utoipa::path(
    delete,
    path = "/admin/empty-bin",
    tag = "visitors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Trash emptied", body = EmptyBinResponse)
    )
)]
pub async fn empty_bin(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(admin): AuthenticatedAdmin,
) -> AppResult<Json<EmptyBinResponse>> {
    let deleted = state.services.visitors.empty_bin(admin.admin_id).await?;
    Ok(Json(EmptyBinResponse { deleted }))
}
