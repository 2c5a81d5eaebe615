//! Visitor incident report service

use crate::{
    error::AppResult,
    models::report::{CreateReport, ReportQuery, UpdateReport, VisitorReport},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get report by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<VisitorReport> {
        self.repository.reports.get_by_id(id).await
    }

    /// List reports, optionally scoped to a visitor or status
    pub async fn list(&self, query: &ReportQuery) -> AppResult<Vec<VisitorReport>> {
        self.repository.reports.list(query).await
    }

    /// Create a report against a visitor
    pub async fn create(&self, data: &CreateReport, created_by: i32) -> AppResult<VisitorReport> {
        // Verify the visitor exists
        self.repository.visitors.get_by_id(data.visitor_id).await?;
        self.repository.reports.create(data, created_by).await
    }

    /// Update a report's status, severity or resolution notes
    pub async fn update(&self, id: i32, data: &UpdateReport) -> AppResult<VisitorReport> {
        self.repository.reports.update(id, data).await
    }
}
