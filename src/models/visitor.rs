//! Visitor model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Visitor sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            "other" => Ok(Sex::Other),
            _ => Err(format!("Invalid sex value: {}", s)),
        }
    }
}

/// Internal row structure for database queries (with String fields)
#[derive(Debug, Clone, FromRow)]
pub struct VisitorRow {
    id: i32,
    full_name: String,
    year_of_birth: i32,
    sex: Option<String>,
    municipality: Option<String>,
    email: Option<String>,
    phone_number: String,
    verified: bool,
    visit_count: i32,
    deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<VisitorRow> for Visitor {
    fn from(row: VisitorRow) -> Self {
        Visitor {
            id: row.id,
            full_name: row.full_name,
            year_of_birth: row.year_of_birth,
            sex: row.sex.and_then(|s| s.parse().ok()),
            municipality: row.municipality,
            email: row.email,
            phone_number: row.phone_number,
            verified: row.verified,
            visit_count: row.visit_count,
            deleted: row.deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Full visitor model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Visitor {
    /// Numeric id, also the source of the displayed badge number
    pub id: i32,
    pub full_name: String,
    pub year_of_birth: i32,
    pub sex: Option<Sex>,
    pub municipality: Option<String>,
    pub email: Option<String>,
    pub phone_number: String,
    /// Admin-controlled trust marker
    pub verified: bool,
    pub visit_count: i32,
    /// Soft-delete flag; trashed visitors stay recoverable
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Visitor {
    /// Badge id shown to visitors: a formatted rendering of the numeric id
    pub fn badge_id(&self) -> String {
        format!("V-{:06}", self.id)
    }
}

/// Kiosk check-in submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckInRequest {
    #[validate(length(min = 2, max = 120, message = "Full name must be 2-120 characters"))]
    pub full_name: String,
    #[validate(range(min = 1900, max = 2100, message = "Year of birth out of range"))]
    pub year_of_birth: i32,
    pub sex: Option<Sex>,
    pub municipality: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 7, max = 20, message = "Phone number must be 7-20 characters"))]
    pub phone_number: String,
    pub purpose: Option<String>,
}

/// Update visitor request (admin patch, named optional fields)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVisitor {
    #[validate(length(min = 2, max = 120, message = "Full name must be 2-120 characters"))]
    pub full_name: Option<String>,
    #[validate(range(min = 1900, max = 2100, message = "Year of birth out of range"))]
    pub year_of_birth: Option<i32>,
    pub sex: Option<Sex>,
    pub municipality: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 7, max = 20, message = "Phone number must be 7-20 characters"))]
    pub phone_number: Option<String>,
}

impl UpdateVisitor {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.year_of_birth.is_none()
            && self.sex.is_none()
            && self.municipality.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
    }
}

/// Visitor list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct VisitorQuery {
    /// Match against name, phone number or email
    pub search: Option<String>,
    pub verified: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Verify visitor request
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyVisitorRequest {
    pub visitor_id: i32,
    pub verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_id_format() {
        let row = VisitorRow {
            id: 123,
            full_name: "Jean Mukendi".to_string(),
            year_of_birth: 1990,
            sex: Some("male".to_string()),
            municipality: None,
            email: None,
            phone_number: "0812345678".to_string(),
            verified: false,
            visit_count: 1,
            deleted: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        let visitor: Visitor = row.into();
        assert_eq!(visitor.badge_id(), "V-000123");
        assert_eq!(visitor.sex, Some(Sex::Male));
    }

    #[test]
    fn test_sex_parsing() {
        assert_eq!("F".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!("male".parse::<Sex>(), Ok(Sex::Male));
        assert!("x".parse::<Sex>().is_err());
    }
}
