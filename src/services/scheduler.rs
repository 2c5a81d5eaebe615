//! Midnight auto-checkout scheduler
//!
//! A single long-lived task owned by the composition root: sleep until the
//! next local midnight, close every active visit, record the outcome in
//! the audit trail, re-arm. A failed run never stops future runs.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Days, Local, NaiveTime, TimeZone};
use tokio::task::JoinHandle;

use crate::services::visits::VisitsService;

pub struct AutoCheckoutScheduler {
    visits: VisitsService,
}

impl AutoCheckoutScheduler {
    pub fn new(visits: VisitsService) -> Self {
        Self { visits }
    }

    /// Start the recurring midnight loop
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    async fn run(self) {
        loop {
            let wait = duration_until_next_midnight(&Local::now());
            tracing::info!(
                "Auto-checkout scheduler armed, next run in {}s",
                wait.as_secs()
            );
            tokio::time::sleep(wait).await;

            match self.visits.auto_checkout(None).await {
                Ok(count) => {
                    tracing::info!("Scheduled auto-checkout closed {} visits", count);
                }
                Err(e) => {
                    tracing::error!("Scheduled auto-checkout failed: {}", e);
                    if let Err(log_err) = self.visits.log_auto_checkout_failure(&e).await {
                        tracing::error!("Failed to record auto-checkout failure: {}", log_err);
                    }
                }
            }
        }
    }
}

/// Time left until the next midnight in the given zone.
///
/// On days where midnight does not exist (DST transitions) the timer
/// re-arms an hour later and recomputes.
fn duration_until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> StdDuration {
    let tomorrow = now.date_naive() + Days::new(1);
    let midnight = tomorrow.and_time(NaiveTime::MIN);

    match now.timezone().from_local_datetime(&midnight).earliest() {
        Some(next) => (next - now.clone())
            .to_std()
            .unwrap_or(StdDuration::from_secs(1)),
        None => StdDuration::from_secs(3600),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_evening_to_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 22, 30, 0).unwrap();
        assert_eq!(
            duration_until_next_midnight(&now),
            StdDuration::from_secs(90 * 60)
        );
    }

    #[test]
    fn test_exactly_midnight_arms_for_tomorrow() {
        let now = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();
        assert_eq!(
            duration_until_next_midnight(&now),
            StdDuration::from_secs(24 * 3600)
        );
    }

    #[test]
    fn test_one_second_before_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            duration_until_next_midnight(&now),
            StdDuration::from_secs(1)
        );
    }

    #[test]
    fn test_crosses_month_and_year() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 12, 0, 0).unwrap();
        let next = now + chrono::Duration::from_std(duration_until_next_midnight(&now)).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }
}
