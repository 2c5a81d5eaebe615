//! System log repository (append-only audit trail)

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::system_log::{CreateSystemLog, SystemLog, SystemLogQuery},
};

#[derive(Clone)]
pub struct SystemLogsRepository {
    pool: Pool<Postgres>,
}

impl SystemLogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append an audit trail entry
    pub async fn create(&self, entry: &CreateSystemLog) -> AppResult<SystemLog> {
        let log = sqlx::query_as::<_, SystemLog>(
            r#"
            INSERT INTO system_logs (action, details, admin_id, affected_count)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&entry.action)
        .bind(&entry.details)
        .bind(entry.admin_id)
        .bind(entry.affected_count)
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    /// List entries, newest first, with pagination
    pub async fn list(&self, query: &SystemLogQuery) -> AppResult<(Vec<SystemLog>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(50).clamp(1, 500);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref action) = query.action {
            params.push(action.clone());
            conditions.push(format!("action = ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM system_logs {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            "SELECT * FROM system_logs {} ORDER BY created_at DESC LIMIT {} OFFSET {}",
            where_clause, per_page, offset
        );
        let mut select_builder = sqlx::query_as::<_, SystemLog>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let logs = select_builder.fetch_all(&self.pool).await?;

        Ok((logs, total))
    }
}
