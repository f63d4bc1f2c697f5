use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    entities::entry::{Entry, EntryInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxEntryRepo,
};

/// Listing order by calendar date. The API lists newest first; the report
/// renderer reads ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub(crate) fn sql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

#[async_trait]
pub trait EntryRepository: Sync + Send {
    async fn insert_entry(&self, entry: &EntryInsert) -> Result<Uuid, AppError>;
    async fn get_entry(&self, id: &Uuid) -> Result<Entry, AppError>;
    async fn list_entries(&self, project_id: &Uuid, order: SortOrder) -> Result<Vec<Entry>, AppError>;
    async fn delete_entry(&self, id: &Uuid) -> Result<(), AppError>;
    async fn count_entries(&self, project_id: &Uuid) -> Result<i64, AppError>;
    async fn sum_costs(&self, project_id: &Uuid) -> Result<f64, AppError>;
    async fn sum_work_hours(&self, project_id: &Uuid) -> Result<f64, AppError>;
}

impl SqlxEntryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqlxEntryRepo { pool }
    }
}

#[async_trait]
impl EntryRepository for SqlxEntryRepo {
    async fn insert_entry(&self, entry: &EntryInsert) -> Result<Uuid, AppError> {
        sqlx::query(
            r#"
            INSERT INTO entries (
                id, project_id, date, weather, temperature, content,
                workers_count, materials, work_hours, costs, notes, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id)
        .bind(entry.project_id)
        .bind(entry.date)
        .bind(&entry.weather)
        .bind(entry.temperature)
        .bind(&entry.content)
        .bind(entry.workers_count)
        .bind(&entry.materials)
        .bind(entry.work_hours)
        .bind(entry.costs)
        .bind(&entry.notes)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(entry.id)
    }

    async fn get_entry(&self, id: &Uuid) -> Result<Entry, AppError> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, project_id, date, weather, temperature, content,
                   workers_count, materials, work_hours, costs, notes, created_at
            FROM entries
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".into()))?;

        Ok(entry)
    }

    async fn list_entries(&self, project_id: &Uuid, order: SortOrder) -> Result<Vec<Entry>, AppError> {
        let query = format!(
            r#"
            SELECT id, project_id, date, weather, temperature, content,
                   workers_count, materials, work_hours, costs, notes, created_at
            FROM entries
            WHERE project_id = ?
            ORDER BY date {}, created_at {}
            "#,
            order.sql(),
            order.sql()
        );

        let entries = sqlx::query_as::<_, Entry>(&query)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    async fn delete_entry(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Entry not found".into()));
        }

        Ok(())
    }

    async fn count_entries(&self, project_id: &Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM entries WHERE project_id = ?",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn sum_costs(&self, project_id: &Uuid) -> Result<f64, AppError> {
        let sum = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(costs), 0.0) FROM entries WHERE project_id = ?",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(sum)
    }

    async fn sum_work_hours(&self, project_id: &Uuid) -> Result<f64, AppError> {
        let sum = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(work_hours), 0.0) FROM entries WHERE project_id = ?",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(sum)
    }
}
