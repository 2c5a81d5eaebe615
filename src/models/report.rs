//! Visitor incident report model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Report severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportSeverity {
    Low,
    Medium,
    High,
}

impl ReportSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportSeverity::Low => "low",
            ReportSeverity::Medium => "medium",
            ReportSeverity::High => "high",
        }
    }
}

impl std::fmt::Display for ReportSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReportSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(ReportSeverity::Low),
            "medium" => Ok(ReportSeverity::Medium),
            "high" => Ok(ReportSeverity::High),
            _ => Err(format!("Invalid report severity: {}", s)),
        }
    }
}

/// Report status; moves forward by convention (open → under_review → resolved)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Open,
    UnderReview,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Open => "open",
            ReportStatus::UnderReview => "under_review",
            ReportStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(ReportStatus::Open),
            "under_review" => Ok(ReportStatus::UnderReview),
            "resolved" => Ok(ReportStatus::Resolved),
            _ => Err(format!("Invalid report status: {}", s)),
        }
    }
}

/// Internal row structure for database queries (with String fields)
#[derive(Debug, Clone, FromRow)]
pub struct VisitorReportRow {
    id: i32,
    visitor_id: i32,
    report_type: String,
    description: String,
    severity: String,
    status: String,
    resolution_notes: Option<String>,
    resolved_at: Option<DateTime<Utc>>,
    created_by: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<VisitorReportRow> for VisitorReport {
    fn from(row: VisitorReportRow) -> Self {
        VisitorReport {
            id: row.id,
            visitor_id: row.visitor_id,
            report_type: row.report_type,
            description: row.description,
            severity: row.severity.parse().unwrap_or(ReportSeverity::Low),
            status: row.status.parse().unwrap_or(ReportStatus::Open),
            resolution_notes: row.resolution_notes,
            resolved_at: row.resolved_at,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Incident/behavior note attached to a visitor
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VisitorReport {
    pub id: i32,
    pub visitor_id: i32,
    pub report_type: String,
    pub description: String,
    pub severity: ReportSeverity,
    pub status: ReportStatus,
    pub resolution_notes: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create report request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReport {
    pub visitor_id: i32,
    #[validate(length(min = 1, max = 60, message = "Report type is required"))]
    pub report_type: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub severity: Option<ReportSeverity>,
}

/// Update report request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReport {
    pub status: Option<ReportStatus>,
    pub severity: Option<ReportSeverity>,
    pub resolution_notes: Option<String>,
}

/// Report list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    pub visitor_id: Option<i32>,
    pub status: Option<ReportStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [ReportStatus::Open, ReportStatus::UnderReview, ReportStatus::Resolved] {
            assert_eq!(status.as_str().parse::<ReportStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_severity_round_trip() {
        for severity in [ReportSeverity::Low, ReportSeverity::Medium, ReportSeverity::High] {
            assert_eq!(severity.as_str().parse::<ReportSeverity>(), Ok(severity));
        }
    }
}
