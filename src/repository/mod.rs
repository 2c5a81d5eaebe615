//! Repository layer for database operations

pub mod admins;
pub mod reports;
pub mod settings;
pub mod system_logs;
pub mod visitors;
pub mod visits;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub visitors: visitors::VisitorsRepository,
    pub visits: visits::VisitsRepository,
    pub admins: admins::AdminsRepository,
    pub settings: settings::SettingsRepository,
    pub reports: reports::ReportsRepository,
    pub system_logs: system_logs::SystemLogsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            visitors: visitors::VisitorsRepository::new(pool.clone()),
            visits: visits::VisitsRepository::new(pool.clone()),
            admins: admins::AdminsRepository::new(pool.clone()),
            settings: settings::SettingsRepository::new(pool.clone()),
            reports: reports::ReportsRepository::new(pool.clone()),
            system_logs: system_logs::SystemLogsRepository::new(pool.clone()),
            pool,
        }
    }
}
