//! Visit model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// One check-in/check-out episode tied to a visitor
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Visit {
    pub id: i32,
    pub visitor_id: i32,
    pub check_in_time: DateTime<Utc>,
    /// Null while the visit is active
    pub check_out_time: Option<DateTime<Utc>>,
    pub active: bool,
    pub purpose: Option<String>,
    /// Mutual link to a companion's visit
    pub partner_visit_id: Option<i32>,
}

impl Visit {
    pub fn is_active(&self) -> bool {
        self.active && self.check_out_time.is_none()
    }
}

/// Visit with visitor context for the admin dashboard
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct VisitDetails {
    pub id: i32,
    pub visitor_id: i32,
    pub visitor_name: String,
    pub visitor_phone: String,
    pub visitor_verified: bool,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub active: bool,
    pub purpose: Option<String>,
    pub partner_visit_id: Option<i32>,
}

/// Visit list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct VisitQuery {
    pub active: Option<bool>,
    pub visitor_id: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Check-out request (kiosk and admin-forced)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckOutRequest {
    pub visit_id: i32,
}

/// Partner link request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetPartnerRequest {
    pub visit_id: i32,
    /// Null clears the link on both sides
    pub partner_id: Option<i32>,
}
