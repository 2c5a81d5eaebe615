//! Application settings model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Process-wide configuration row, created lazily on first write
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Settings {
    pub id: i32,
    pub app_name: String,
    pub header_name: Option<String>,
    pub footer_name: Option<String>,
    /// Logo as an inline data URL
    pub logo_data: Option<String>,
    /// Country calling code used for phone normalization display
    pub country_code: String,
    pub admin_theme: String,
    pub visitor_theme: String,
    pub default_language: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Settings {
    /// Compiled defaults served until the settings row exists
    pub fn defaults() -> Self {
        Self {
            id: 0,
            app_name: "Karibu".to_string(),
            header_name: None,
            footer_name: None,
            logo_data: None,
            country_code: "243".to_string(),
            admin_theme: "light".to_string(),
            visitor_theme: "light".to_string(),
            default_language: "fr".to_string(),
            updated_at: None,
        }
    }
}

/// Update settings request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSettings {
    pub app_name: Option<String>,
    pub header_name: Option<String>,
    pub footer_name: Option<String>,
    pub logo_data: Option<String>,
    pub country_code: Option<String>,
    pub admin_theme: Option<String>,
    pub visitor_theme: Option<String>,
    pub default_language: Option<String>,
}
