//! Visit lifecycle service: checkout, bulk checkout, partner links

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        system_log::CreateSystemLog,
        visit::{Visit, VisitDetails, VisitQuery},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct VisitsService {
    repository: Repository,
}

impl VisitsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get visit by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Visit> {
        self.repository.visits.get_by_id(id).await
    }

    /// List visits with visitor context
    pub async fn list(&self, query: &VisitQuery) -> AppResult<(Vec<VisitDetails>, i64)> {
        self.repository.visits.list(query).await
    }

    /// Complete a single visit; fails if it is not active
    pub async fn check_out(&self, visit_id: i32) -> AppResult<Visit> {
        let visit = self.repository.visits.check_out(visit_id).await?;
        tracing::info!(visit_id, "Visit checked out");
        Ok(visit)
    }

    /// Complete every active visit and record the action in the audit trail.
    ///
    /// Used by both the admin bulk action (with the acting admin attached)
    /// and the midnight scheduler (without).
    pub async fn auto_checkout(&self, admin_id: Option<i32>) -> AppResult<i64> {
        let count = self.repository.visits.check_out_all(Utc::now()).await?;

        let details = match admin_id {
            Some(id) => format!("Manual checkout of all active visits by admin {}", id),
            None => "Scheduled midnight auto-checkout".to_string(),
        };
        self.repository
            .system_logs
            .create(&CreateSystemLog {
                action: "auto_checkout".to_string(),
                details,
                admin_id,
                affected_count: Some(count as i32),
            })
            .await?;

        Ok(count)
    }

    /// Record a failed scheduled run in the audit trail
    pub async fn log_auto_checkout_failure(&self, error: &AppError) -> AppResult<()> {
        self.repository
            .system_logs
            .create(&CreateSystemLog {
                action: "auto_checkout".to_string(),
                details: format!("Scheduled auto-checkout failed: {}", error),
                admin_id: None,
                affected_count: None,
            })
            .await?;
        Ok(())
    }

    /// Set or clear the mutual partner link between two visits
    pub async fn set_partner(&self, visit_id: i32, partner_id: Option<i32>) -> AppResult<Visit> {
        match partner_id {
            Some(partner_id) => {
                if partner_id == visit_id {
                    return Err(AppError::Validation(
                        "A visit cannot be its own partner".to_string(),
                    ));
                }
                // Both sides must exist before any pointer is written
                self.repository.visits.get_by_id(visit_id).await?;
                self.repository.visits.get_by_id(partner_id).await?;
                self.repository.visits.set_partner(visit_id, partner_id).await
            }
            None => self.repository.visits.clear_partner(visit_id).await,
        }
    }
}
