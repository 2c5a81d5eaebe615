//! Visitor incident report endpoints (admin)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::report::{CreateReport, ReportQuery, UpdateReport, VisitorReport},
};

use super::AuthenticatedAdmin;

/// List reports with filters
#[utoipa::path(
    get,
    path = "/admin/reports",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportQuery),
    responses(
        (status = 200, description = "Reports list", body = Vec<VisitorReport>)
    )
)]
pub async fn list_reports(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<VisitorReport>>> {
    let reports = state.services.reports.list(&query).await?;
    Ok(Json(reports))
}

/// List all reports for one visitor
#[utoipa::path(
    get,
    path = "/admin/visitors/{id}/reports",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Visitor ID")),
    responses(
        (status = 200, description = "Visitor's reports", body = Vec<VisitorReport>)
    )
)]
pub async fn list_visitor_reports(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<VisitorReport>>> {
    let query = ReportQuery {
        visitor_id: Some(id),
        status: None,
    };
    let reports = state.services.reports.list(&query).await?;
    Ok(Json(reports))
}

/// Get report by ID
#[utoipa::path(
    get,
    path = "/admin/reports/{id}",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report details", body = VisitorReport),
        (status = 404, description = "Report not found")
    )
)]
pub async fn get_report(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Path(id): Path<i32>,
) -> AppResult<Json<VisitorReport>> {
    let report = state.services.reports.get_by_id(id).await?;
    Ok(Json(report))
}

/// Create a report against a visitor
#[utoipa::path(
    post,
    path = "/admin/reports",
    tag = "reports",
    security(("bearer_auth" = [])),
    request_body = CreateReport,
    responses(
        (status = 201, description = "Report created", body = VisitorReport),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn create_report(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(admin): AuthenticatedAdmin,
    Json(request): Json<CreateReport>,
) -> AppResult<(StatusCode, Json<VisitorReport>)> {
    request.validate()?;

    let report = state
        .services
        .reports
        .create(&request, admin.admin_id)
        .await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// Update a report's status, severity or resolution notes
#[utoipa::path(
    put,
    path = "/admin/reports/{id}",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Report ID")),
    request_body = UpdateReport,
    responses(
        (status = 200, description = "Report updated", body = VisitorReport),
        (status = 404, description = "Report not found")
    )
)]
pub async fn update_report(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Path(id): Path<i32>,
    Json(request): Json<UpdateReport>,
) -> AppResult<Json<VisitorReport>> {
    let report = state.services.reports.update(id, &request).await?;
    Ok(Json(report))
}
