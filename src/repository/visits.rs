//! Visits repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::visit::{Visit, VisitDetails, VisitQuery},
};

#[derive(Clone)]
pub struct VisitsRepository {
    pool: Pool<Postgres>,
}

impl VisitsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get visit by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Visit> {
        sqlx::query_as::<_, Visit>("SELECT * FROM visits WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Visit with id {} not found", id)))
    }

    /// Create a new visit in the Active state
    pub async fn create(&self, visitor_id: i32, purpose: Option<&str>) -> AppResult<Visit> {
        let visit = sqlx::query_as::<_, Visit>(
            r#"
            INSERT INTO visits (visitor_id, check_in_time, active, purpose)
            VALUES ($1, $2, TRUE, $3)
            RETURNING *
            "#,
        )
        .bind(visitor_id)
        .bind(Utc::now())
        .bind(purpose)
        .fetch_one(&self.pool)
        .await?;

        Ok(visit)
    }

    /// Transition an Active visit to Completed.
    ///
    /// One-shot: a completed visit keeps its original checkout timestamp.
    pub async fn check_out(&self, id: i32) -> AppResult<Visit> {
        let visit = self.get_by_id(id).await?;

        if !visit.is_active() {
            return Err(AppError::InvalidState("Visit is not active".to_string()));
        }

        let updated = sqlx::query_as::<_, Visit>(
            r#"
            UPDATE visits SET check_out_time = $2, active = FALSE
            WHERE id = $1 AND active = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::InvalidState("Visit is not active".to_string()))?;

        Ok(updated)
    }

    /// Complete every Active visit with a single shared timestamp.
    ///
    /// Returns the number of visits transitioned.
    pub async fn check_out_all(&self, at: DateTime<Utc>) -> AppResult<i64> {
        let result = sqlx::query(
            "UPDATE visits SET check_out_time = $1, active = FALSE WHERE active = TRUE",
        )
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() as i64)
    }

    /// Whether the visitor has any Active visit
    pub async fn has_active(&self, visitor_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM visits WHERE visitor_id = $1 AND active = TRUE)",
        )
        .bind(visitor_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Link two visits as partners, both pointers in one transaction.
    ///
    /// Any stale reverse pointer at a third visit is cleared first so the
    /// link never becomes one-sided.
    pub async fn set_partner(&self, visit_id: i32, partner_id: i32) -> AppResult<Visit> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE visits SET partner_visit_id = NULL WHERE partner_visit_id = $1 AND id != $2",
        )
        .bind(visit_id)
        .bind(partner_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE visits SET partner_visit_id = NULL WHERE partner_visit_id = $1 AND id != $2",
        )
        .bind(partner_id)
        .bind(visit_id)
        .execute(&mut *tx)
        .await?;

        let visit = sqlx::query_as::<_, Visit>(
            "UPDATE visits SET partner_visit_id = $2 WHERE id = $1 RETURNING *",
        )
        .bind(visit_id)
        .bind(partner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Visit with id {} not found", visit_id)))?;

        let mirrored = sqlx::query(
            "UPDATE visits SET partner_visit_id = $2 WHERE id = $1",
        )
        .bind(partner_id)
        .bind(visit_id)
        .execute(&mut *tx)
        .await?;

        if mirrored.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Visit with id {} not found",
                partner_id
            )));
        }

        tx.commit().await?;
        Ok(visit)
    }

    /// Clear the partner link on a visit and on whichever visit points back
    pub async fn clear_partner(&self, visit_id: i32) -> AppResult<Visit> {
        let mut tx = self.pool.begin().await?;

        let visit = sqlx::query_as::<_, Visit>(
            "UPDATE visits SET partner_visit_id = NULL WHERE id = $1 RETURNING *",
        )
        .bind(visit_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Visit with id {} not found", visit_id)))?;

        // Reverse lookup: the reciprocal pointer may live on any visit
        sqlx::query("UPDATE visits SET partner_visit_id = NULL WHERE partner_visit_id = $1")
            .bind(visit_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(visit)
    }

    /// List visits with visitor context and pagination
    pub async fn list(&self, query: &VisitQuery) -> AppResult<(Vec<VisitDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 200);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();

        if let Some(active) = query.active {
            conditions.push(format!("v.active = {}", active));
        }
        if let Some(visitor_id) = query.visitor_id {
            conditions.push(format!("v.visitor_id = {}", visitor_id));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM visits v {}", where_clause);
        let total: i64 = sqlx::query_scalar(&count_query).fetch_one(&self.pool).await?;

        let select_query = format!(
            r#"
            SELECT v.id, v.visitor_id, r.full_name as visitor_name,
                   r.phone_number as visitor_phone, r.verified as visitor_verified,
                   v.check_in_time, v.check_out_time, v.active, v.purpose, v.partner_visit_id
            FROM visits v
            JOIN visitors r ON v.visitor_id = r.id
            {}
            ORDER BY v.check_in_time DESC
            LIMIT {} OFFSET {}
            "#,
            where_clause, per_page, offset
        );

        let visits = sqlx::query_as::<_, VisitDetails>(&select_query)
            .fetch_all(&self.pool)
            .await?;

        Ok((visits, total))
    }

    /// Count active visits
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE active = TRUE")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count visits checked in since the given instant
    pub async fn count_since(&self, since: DateTime<Utc>) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE check_in_time >= $1")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count all visits
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
