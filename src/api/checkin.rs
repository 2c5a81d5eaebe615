//! Public kiosk endpoints: check-in and check-out
//!
//! Intentionally unauthenticated; the kiosk runs unattended at the
//! reception desk.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        visit::{CheckOutRequest, Visit},
        visitor::{CheckInRequest, Visitor},
    },
};

/// Check-in response with the resolved visitor and the new visit
#[derive(Serialize, ToSchema)]
pub struct CheckInResponse {
    pub visitor: Visitor,
    pub visit: Visit,
    /// Badge number shown to the visitor
    pub badge_id: String,
    /// True when an existing visitor was matched
    pub returning: bool,
}

/// Register a visitor and open a visit
#[utoipa::path(
    post,
    path = "/visitors/check-in",
    tag = "kiosk",
    request_body = CheckInRequest,
    responses(
        (status = 201, description = "Visitor checked in", body = CheckInResponse),
        (status = 400, description = "Invalid submission")
    )
)]
pub async fn check_in(
    State(state): State<crate::AppState>,
    Json(request): Json<CheckInRequest>,
) -> AppResult<(StatusCode, Json<CheckInResponse>)> {
    request.validate()?;

    let outcome = state.services.checkin.check_in(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckInResponse {
            badge_id: outcome.visitor.badge_id(),
            visitor: outcome.visitor,
            visit: outcome.visit,
            returning: outcome.returning,
        }),
    ))
}

/// Close an active visit
#[utoipa::path(
    post,
    path = "/visitors/check-out",
    tag = "kiosk",
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Visit checked out", body = Visit),
        (status = 400, description = "Visit is not active"),
        (status = 404, description = "Visit not found")
    )
)]
pub async fn check_out(
    State(state): State<crate::AppState>,
    Json(request): Json<CheckOutRequest>,
) -> AppResult<Json<Visit>> {
    let visit = state.services.visits.check_out(request.visit_id).await?;
    Ok(Json(visit))
}
