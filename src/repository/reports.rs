//! Visitor reports repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::report::{
        CreateReport, ReportQuery, ReportSeverity, ReportStatus, UpdateReport, VisitorReport,
        VisitorReportRow,
    },
};

#[derive(Clone)]
pub struct ReportsRepository {
    pool: Pool<Postgres>,
}

impl ReportsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get report by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<VisitorReport> {
        sqlx::query_as::<_, VisitorReportRow>("SELECT * FROM visitor_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(VisitorReport::from)
            .ok_or_else(|| AppError::NotFound(format!("Report with id {} not found", id)))
    }

    /// List reports, newest first
    pub async fn list(&self, query: &ReportQuery) -> AppResult<Vec<VisitorReport>> {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(visitor_id) = query.visitor_id {
            conditions.push(format!("visitor_id = {}", visitor_id));
        }
        if let Some(status) = query.status {
            params.push(status.as_str().to_string());
            conditions.push(format!("status = ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_query = format!(
            "SELECT * FROM visitor_reports {} ORDER BY created_at DESC",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, VisitorReportRow>(&select_query);
        for param in &params {
            builder = builder.bind(param);
        }

        let reports = builder
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(VisitorReport::from)
            .collect();

        Ok(reports)
    }

    /// Create a new report
    pub async fn create(&self, data: &CreateReport, created_by: i32) -> AppResult<VisitorReport> {
        let severity = data.severity.unwrap_or(ReportSeverity::Low);

        let row = sqlx::query_as::<_, VisitorReportRow>(
            r#"
            INSERT INTO visitor_reports (visitor_id, report_type, description, severity, status, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.visitor_id)
        .bind(&data.report_type)
        .bind(&data.description)
        .bind(severity.as_str())
        .bind(ReportStatus::Open.as_str())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a report; resolving stamps resolved_at
    pub async fn update(&self, id: i32, data: &UpdateReport) -> AppResult<VisitorReport> {
        let resolved_at = match data.status {
            Some(ReportStatus::Resolved) => Some(Utc::now()),
            _ => None,
        };

        let row = sqlx::query_as::<_, VisitorReportRow>(
            r#"
            UPDATE visitor_reports SET
                status = COALESCE($2, status),
                severity = COALESCE($3, severity),
                resolution_notes = COALESCE($4, resolution_notes),
                resolved_at = COALESCE($5, resolved_at)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.status.map(|s| s.as_str()))
        .bind(data.severity.map(|s| s.as_str()))
        .bind(&data.resolution_notes)
        .bind(resolved_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report with id {} not found", id)))?;

        Ok(row.into())
    }

    /// Count reports still open or under review
    pub async fn count_unresolved(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM visitor_reports WHERE status != 'resolved'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
