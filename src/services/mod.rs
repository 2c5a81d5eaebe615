//! Business logic services

pub mod auth;
pub mod checkin;
pub mod notifier;
pub mod reports;
pub mod scheduler;
pub mod settings;
pub mod stats;
pub mod system_logs;
pub mod visitors;
pub mod visits;

use crate::{
    config::{AuthConfig, KioskConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub checkin: checkin::CheckInService,
    pub visitors: visitors::VisitorsService,
    pub visits: visits::VisitsService,
    pub settings: settings::SettingsService,
    pub reports: reports::ReportsService,
    pub stats: stats::StatsService,
    pub system_logs: system_logs::SystemLogsService,
    pub notifier: notifier::Notifier,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig, kiosk_config: KioskConfig) -> Self {
        let notifier = notifier::Notifier::new(kiosk_config.notification_capacity);

        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            checkin: checkin::CheckInService::new(
                repository.clone(),
                notifier.clone(),
                kiosk_config.country_code.clone(),
            ),
            visitors: visitors::VisitorsService::new(repository.clone()),
            visits: visits::VisitsService::new(repository.clone()),
            settings: settings::SettingsService::new(repository.clone()),
            reports: reports::ReportsService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            system_logs: system_logs::SystemLogsService::new(repository),
            notifier,
        }
    }
}
