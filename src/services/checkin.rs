//! Visitor identity resolution on check-in
//!
//! A check-in submission is matched against existing visitors by exact
//! email, then exact phone string, then normalized phone. A match
//! refreshes the stored profile; no match creates a new visitor. Either
//! way a new Active visit is opened and the dashboard channel notified.

use crate::{
    error::AppResult,
    models::{
        visit::Visit,
        visitor::{CheckInRequest, UpdateVisitor, Visitor},
    },
    phone,
    repository::Repository,
    services::notifier::Notifier,
};

/// Result of a successful check-in
#[derive(Debug, Clone)]
pub struct CheckInOutcome {
    pub visitor: Visitor,
    pub visit: Visit,
    /// True when the visitor was resolved instead of created
    pub returning: bool,
}

#[derive(Clone)]
pub struct CheckInService {
    repository: Repository,
    notifier: Notifier,
    default_country_code: String,
}

impl CheckInService {
    pub fn new(repository: Repository, notifier: Notifier, default_country_code: String) -> Self {
        Self {
            repository,
            notifier,
            default_country_code,
        }
    }

    /// Resolve or create the visitor, open a visit, notify dashboards
    pub async fn check_in(&self, data: CheckInRequest) -> AppResult<CheckInOutcome> {
        let (visitor, returning) = match self.resolve(&data).await? {
            Some(found) => {
                self.refresh_profile(&found, &data).await?;
                self.repository
                    .visitors
                    .increment_visit_count(found.id)
                    .await?;
                (self.repository.visitors.get_by_id(found.id).await?, true)
            }
            None => (self.repository.visitors.create(&data).await?, false),
        };

        let visit = self
            .repository
            .visits
            .create(visitor.id, data.purpose.as_deref())
            .await?;

        tracing::info!(
            visitor_id = visitor.id,
            visit_id = visit.id,
            returning,
            "Visitor checked in"
        );

        self.notifier
            .broadcast_check_in(&visitor, visit.purpose.as_deref(), returning);

        Ok(CheckInOutcome {
            visitor,
            visit,
            returning,
        })
    }

    /// Ordered lookup: email, exact phone, normalized phone. First match wins.
    async fn resolve(&self, data: &CheckInRequest) -> AppResult<Option<Visitor>> {
        if let Some(email) = data.email.as_deref() {
            if !email.is_empty() {
                if let Some(visitor) = self.repository.visitors.find_by_email(email).await? {
                    return Ok(Some(visitor));
                }
            }
        }

        if let Some(visitor) = self
            .repository
            .visitors
            .find_by_phone(&data.phone_number)
            .await?
        {
            return Ok(Some(visitor));
        }

        let country_code = self.country_code().await?;
        let candidate = match phone::normalize(&data.phone_number, &country_code) {
            Some(candidate) => candidate,
            // Too short to match safely: skip the fuzzy pass
            None => return Ok(None),
        };

        for (id, stored) in self.repository.visitors.phone_directory().await? {
            if phone::normalize(&stored, &country_code).as_deref() == Some(candidate.as_str()) {
                return Ok(Some(self.repository.visitors.get_by_id(id).await?));
            }
        }

        Ok(None)
    }

    /// Update stored fields that differ from the submission, and bring a
    /// trashed visitor back: a live check-in contradicts the trashed state.
    async fn refresh_profile(&self, found: &Visitor, data: &CheckInRequest) -> AppResult<()> {
        let patch = UpdateVisitor {
            full_name: (data.full_name != found.full_name).then(|| data.full_name.clone()),
            year_of_birth: (data.year_of_birth != found.year_of_birth)
                .then_some(data.year_of_birth),
            sex: data.sex.filter(|s| found.sex != Some(*s)),
            municipality: data
                .municipality
                .clone()
                .filter(|m| found.municipality.as_deref() != Some(m.as_str())),
            email: data
                .email
                .clone()
                .filter(|e| found.email.as_deref() != Some(e.as_str())),
            phone_number: (data.phone_number != found.phone_number)
                .then(|| data.phone_number.clone()),
        };

        if !patch.is_empty() {
            self.repository.visitors.update(found.id, &patch).await?;
        }

        if found.deleted {
            self.repository.visitors.set_deleted(found.id, false).await?;
            tracing::info!(visitor_id = found.id, "Trashed visitor restored by check-in");
        }

        Ok(())
    }

    /// Country calling code for phone normalization: the settings row wins,
    /// the configuration default applies before first write.
    async fn country_code(&self) -> AppResult<String> {
        Ok(self
            .repository
            .settings
            .get()
            .await?
            .map(|s| s.country_code)
            .unwrap_or_else(|| self.default_country_code.clone()))
    }
}
