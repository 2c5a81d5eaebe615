//! Visitors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::visitor::{CheckInRequest, UpdateVisitor, Visitor, VisitorQuery, VisitorRow},
};

#[derive(Clone)]
pub struct VisitorsRepository {
    pool: Pool<Postgres>,
}

impl VisitorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get visitor by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Visitor> {
        sqlx::query_as::<_, VisitorRow>("SELECT * FROM visitors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Visitor::from)
            .ok_or_else(|| AppError::NotFound(format!("Visitor with id {} not found", id)))
    }

    /// Find a visitor by exact email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Visitor>> {
        let row = sqlx::query_as::<_, VisitorRow>(
            "SELECT * FROM visitors WHERE LOWER(email) = LOWER($1) ORDER BY id LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Visitor::from))
    }

    /// Find a visitor by exact phone string
    pub async fn find_by_phone(&self, phone: &str) -> AppResult<Option<Visitor>> {
        let row = sqlx::query_as::<_, VisitorRow>(
            "SELECT * FROM visitors WHERE phone_number = $1 ORDER BY id LIMIT 1",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Visitor::from))
    }

    /// All (id, phone_number) pairs, for normalized-phone matching.
    ///
    /// No normalized index exists, so the resolver does a linear scan.
    pub async fn phone_directory(&self) -> AppResult<Vec<(i32, String)>> {
        let rows = sqlx::query_as::<_, (i32, String)>("SELECT id, phone_number FROM visitors")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Search non-trashed visitors with pagination
    pub async fn search(&self, query: &VisitorQuery) -> AppResult<(Vec<Visitor>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 200);
        let offset = (page - 1) * per_page;

        let mut conditions = vec!["deleted = FALSE".to_string()];
        let mut params: Vec<String> = Vec::new();

        if let Some(ref search) = query.search {
            params.push(format!("%{}%", search.to_lowercase()));
            conditions.push(format!(
                "(LOWER(full_name) LIKE ${n} OR phone_number LIKE ${n} OR LOWER(email) LIKE ${n})",
                n = params.len()
            ));
        }

        if let Some(verified) = query.verified {
            conditions.push(format!("verified = {}", verified));
        }

        let where_clause = format!("WHERE {}", conditions.join(" AND "));

        let count_query = format!("SELECT COUNT(*) FROM visitors {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            "SELECT * FROM visitors {} ORDER BY created_at DESC LIMIT {} OFFSET {}",
            where_clause, per_page, offset
        );
        let mut select_builder = sqlx::query_as::<_, VisitorRow>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let visitors = select_builder
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Visitor::from)
            .collect();

        Ok((visitors, total))
    }

    /// List trashed visitors, most recently trashed first
    pub async fn list_trashed(&self) -> AppResult<Vec<Visitor>> {
        let rows = sqlx::query_as::<_, VisitorRow>(
            "SELECT * FROM visitors WHERE deleted = TRUE ORDER BY updated_at DESC NULLS LAST",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Visitor::from).collect())
    }

    /// Create a new visitor from check-in data
    pub async fn create(&self, data: &CheckInRequest) -> AppResult<Visitor> {
        let row = sqlx::query_as::<_, VisitorRow>(
            r#"
            INSERT INTO visitors (full_name, year_of_birth, sex, municipality, email, phone_number, verified, visit_count, deleted)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, 1, FALSE)
            RETURNING *
            "#,
        )
        .bind(&data.full_name)
        .bind(data.year_of_birth)
        .bind(data.sex.map(|s| s.as_str()))
        .bind(&data.municipality)
        .bind(&data.email)
        .bind(&data.phone_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a visitor's mutable fields
    pub async fn update(&self, id: i32, data: &UpdateVisitor) -> AppResult<Visitor> {
        if data.is_empty() {
            return self.get_by_id(id).await;
        }

        let sex = data.sex.map(|s| s.as_str().to_string());

        // Build dynamic update query
        let mut sets = Vec::new();
        let mut param_idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(data.full_name, "full_name");
        add_field!(data.year_of_birth, "year_of_birth");
        add_field!(sex, "sex");
        add_field!(data.municipality, "municipality");
        add_field!(data.email, "email");
        add_field!(data.phone_number, "phone_number");

        debug_assert_eq!(sets.len() + 1, param_idx);

        let query = format!("UPDATE visitors SET {} WHERE id = {}", sets.join(", "), id);

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.full_name);
        bind_field!(data.year_of_birth);
        bind_field!(sex);
        bind_field!(data.municipality);
        bind_field!(data.email);
        bind_field!(data.phone_number);

        let result = builder.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Visitor with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Set the admin-controlled verified flag
    pub async fn set_verified(&self, id: i32, verified: bool) -> AppResult<Visitor> {
        let row = sqlx::query_as::<_, VisitorRow>(
            "UPDATE visitors SET verified = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(verified)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Visitor with id {} not found", id)))?;

        Ok(row.into())
    }

    /// Set or clear the soft-delete flag
    pub async fn set_deleted(&self, id: i32, deleted: bool) -> AppResult<Visitor> {
        let row = sqlx::query_as::<_, VisitorRow>(
            "UPDATE visitors SET deleted = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(deleted)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Visitor with id {} not found", id)))?;

        Ok(row.into())
    }

    /// Bump the monotonic visit counter
    pub async fn increment_visit_count(&self, id: i32) -> AppResult<()> {
        sqlx::query("UPDATE visitors SET visit_count = visit_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Permanently delete a visitor and all their visits; irreversible
    pub async fn permanently_delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM visits WHERE visitor_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM visitors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Visitor with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Permanently delete every trashed visitor; returns the count removed
    pub async fn empty_bin(&self) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM visits WHERE visitor_id IN (SELECT id FROM visitors WHERE deleted = TRUE)",
        )
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM visitors WHERE deleted = TRUE")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() as i64)
    }

    /// Count non-trashed visitors
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM visitors WHERE deleted = FALSE")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count verified visitors
    pub async fn count_verified(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM visitors WHERE deleted = FALSE AND verified = TRUE",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count trashed visitors
    pub async fn count_trashed(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visitors WHERE deleted = TRUE")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
