//! System log service (read side of the audit trail)

use crate::{
    error::AppResult,
    models::system_log::{SystemLog, SystemLogQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct SystemLogsService {
    repository: Repository,
}

impl SystemLogsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List audit trail entries, newest first
    pub async fn list(&self, query: &SystemLogQuery) -> AppResult<(Vec<SystemLog>, i64)> {
        self.repository.system_logs.list(query).await
    }
}
