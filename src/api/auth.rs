//! Admin authentication endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppResult, models::admin::LoginRequest};

use super::{AuthenticatedAdmin, BearerToken};

/// Admin identity for API responses
#[derive(Serialize, ToSchema)]
pub struct AdminInfo {
    pub id: i32,
    pub username: String,
    pub full_name: Option<String>,
}

/// Login response with session token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// Opaque session token
    pub token: String,
    pub token_type: String,
    pub admin: AdminInfo,
}

/// Logout response
#[derive(Serialize, ToSchema)]
pub struct LogoutResponse {
    pub status: String,
}

/// Authenticate an admin and open a session
#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    request.validate()?;

    let (token, admin) = state
        .services
        .auth
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        admin: AdminInfo {
            id: admin.id,
            username: admin.username,
            full_name: admin.full_name,
        },
    }))
}

/// Close the current session
#[utoipa::path(
    post,
    path = "/admin/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Session closed", body = LogoutResponse)
    )
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<Json<LogoutResponse>> {
    state.services.auth.logout(&token).await?;

    Ok(Json(LogoutResponse {
        status: "logged_out".to_string(),
    }))
}

/// Current admin identity
#[utoipa::path(
    get,
    path = "/admin/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current admin", body = AdminInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(context): AuthenticatedAdmin,
) -> AppResult<Json<AdminInfo>> {
    let admin = state.services.auth.get_admin(context.admin_id).await?;

    Ok(Json(AdminInfo {
        id: admin.id,
        username: admin.username,
        full_name: admin.full_name,
    }))
}
