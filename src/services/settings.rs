//! Settings service

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::{
    error::{AppError, AppResult},
    models::settings::{Settings, UpdateSettings},
    repository::Repository,
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
}

impl SettingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Current settings; compiled defaults until the row is first written
    pub async fn get(&self) -> AppResult<Settings> {
        Ok(self
            .repository
            .settings
            .get()
            .await?
            .unwrap_or_else(Settings::defaults))
    }

    /// Update settings, creating the singleton row on first write
    pub async fn update(&self, data: UpdateSettings) -> AppResult<Settings> {
        if let Some(ref logo) = data.logo_data {
            validate_logo_data(logo)?;
        }

        if let Some(ref code) = data.country_code {
            if !code.chars().all(|c| c.is_ascii_digit()) || code.is_empty() || code.len() > 4 {
                return Err(AppError::Validation(
                    "Country code must be 1-4 digits".to_string(),
                ));
            }
        }

        self.repository.settings.upsert(&data).await
    }
}

/// The logo is stored inline as a data URL; reject payloads that are not
/// decodable base64 before they reach the store.
fn validate_logo_data(logo: &str) -> AppResult<()> {
    let payload = logo.rsplit_once("base64,").map(|(_, p)| p).unwrap_or(logo);
    BASE64
        .decode(payload)
        .map_err(|_| AppError::Validation("Logo data is not valid base64".to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_logo_data_url() {
        assert!(validate_logo_data("data:image/png;base64,iVBORw0KGgo=").is_ok());
    }

    #[test]
    fn test_bare_base64_accepted() {
        assert!(validate_logo_data("iVBORw0KGgo=").is_ok());
    }

    #[test]
    fn test_invalid_logo_rejected() {
        assert!(validate_logo_data("data:image/png;base64,not base64!!").is_err());
    }
}
