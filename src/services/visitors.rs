//! Visitor management service: listing, edits, verification, trash

use crate::{
    error::AppResult,
    models::{
        system_log::CreateSystemLog,
        visitor::{UpdateVisitor, Visitor, VisitorQuery},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct VisitorsService {
    repository: Repository,
}

impl VisitorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get visitor by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Visitor> {
        self.repository.visitors.get_by_id(id).await
    }

    /// Search non-trashed visitors
    pub async fn search(&self, query: &VisitorQuery) -> AppResult<(Vec<Visitor>, i64)> {
        self.repository.visitors.search(query).await
    }

    /// List the trash
    pub async fn list_trashed(&self) -> AppResult<Vec<Visitor>> {
        self.repository.visitors.list_trashed().await
    }

    /// Update a visitor's mutable fields
    pub async fn update(&self, id: i32, data: &UpdateVisitor) -> AppResult<Visitor> {
        self.repository.visitors.update(id, data).await
    }

    /// Set the admin-controlled verified flag
    pub async fn set_verified(&self, id: i32, verified: bool) -> AppResult<Visitor> {
        self.repository.visitors.set_verified(id, verified).await
    }

    /// Move a visitor to the trash.
    ///
    /// Returns false without touching the record while the visitor has an
    /// active visit; the deletion guard prevents orphaning a live check-in.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        self.repository.visitors.get_by_id(id).await?;

        if self.repository.visits.has_active(id).await? {
            return Ok(false);
        }

        self.repository.visitors.set_deleted(id, true).await?;
        tracing::info!(visitor_id = id, "Visitor moved to trash");
        Ok(true)
    }

    /// Restore a trashed visitor; clears the flag unconditionally
    pub async fn restore(&self, id: i32) -> AppResult<Visitor> {
        let visitor = self.repository.visitors.set_deleted(id, false).await?;
        tracing::info!(visitor_id = id, "Visitor restored from trash");
        Ok(visitor)
    }

    /// Permanently delete a visitor and all their visits; irreversible
    pub async fn permanently_delete(&self, id: i32) -> AppResult<()> {
        self.repository.visitors.permanently_delete(id).await?;
        tracing::info!(visitor_id = id, "Visitor permanently deleted");
        Ok(())
    }

    /// Permanently delete every trashed visitor; logs the bulk action
    pub async fn empty_bin(&self, admin_id: i32) -> AppResult<i64> {
        let count = self.repository.visitors.empty_bin().await?;

        self.repository
            .system_logs
            .create(&CreateSystemLog {
                action: "empty_bin".to_string(),
                details: "Emptied the visitor trash".to_string(),
                admin_id: Some(admin_id),
                affected_count: Some(count as i32),
            })
            .await?;

        Ok(count)
    }
}
