//! Dashboard statistics service

use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};

use crate::{
    api::stats::{ReportStats, StatsResponse, VisitStats, VisitorStats},
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Aggregate counters for the admin dashboard
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let visitors = VisitorStats {
            total: self.repository.visitors.count().await?,
            verified: self.repository.visitors.count_verified().await?,
            trashed: self.repository.visitors.count_trashed().await?,
        };

        let visits = VisitStats {
            active: self.repository.visits.count_active().await?,
            today: self
                .repository
                .visits
                .count_since(start_of_local_day())
                .await?,
            total: self.repository.visits.count().await?,
        };

        let reports = ReportStats {
            unresolved: self.repository.reports.count_unresolved().await?,
        };

        Ok(StatsResponse {
            visitors,
            visits,
            reports,
        })
    }
}

/// Start of the current local calendar day, in UTC
fn start_of_local_day() -> DateTime<Utc> {
    let now = Local::now();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(start) => start.with_timezone(&Utc),
        None => now.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_local_day_is_not_in_the_future() {
        let start = start_of_local_day();
        assert!(start <= Utc::now());
        // Never more than 24 hours in the past
        assert!(Utc::now() - start <= chrono::Duration::hours(24));
    }
}
