//! Settings endpoints
//!
//! Reading is public: the kiosk needs branding and theme values before
//! anyone is signed in. Writing is admin-only.

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::settings::{Settings, UpdateSettings},
};

use super::AuthenticatedAdmin;

/// Get current settings
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Current settings", body = Settings)
    )
)]
pub async fn get_settings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Settings>> {
    let settings = state.services.settings.get().await?;
    Ok(Json(settings))
}

/// Update settings
#[utoipa::path(
    put,
    path = "/admin/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    request_body = UpdateSettings,
    responses(
        (status = 200, description = "Settings updated", body = Settings),
        (status = 400, description = "Invalid settings payload")
    )
)]
pub async fn update_settings(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_admin): AuthenticatedAdmin,
    Json(request): Json<UpdateSettings>,
) -> AppResult<Json<Settings>> {
    let settings = state.services.settings.update(request).await?;
    Ok(Json(settings))
}
