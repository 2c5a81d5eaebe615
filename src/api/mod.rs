//! API handlers for Karibu REST endpoints

pub mod auth;
pub mod checkin;
pub mod health;
pub mod openapi;
pub mod reports;
pub mod settings;
pub mod stats;
pub mod system_logs;
pub mod visitors;
pub mod visits;
pub mod ws;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::admin::AdminContext, AppState};

/// Raw bearer token from the Authorization header
pub struct BearerToken(pub String);

#[async_trait]
impl FromRequestParts<AppState> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        Ok(BearerToken(auth_header[7..].to_string()))
    }
}

/// Extractor for the authenticated admin behind a session token
pub struct AuthenticatedAdmin(pub AdminContext);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;

        // Session tokens are opaque; every request revalidates against the store
        let context = state.services.auth.validate_token(&token).await?;

        Ok(AuthenticatedAdmin(context))
    }
}
