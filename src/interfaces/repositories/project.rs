use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectInsert, UpdateProjectRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

#[async_trait]
pub trait ProjectRepository: Sync + Send {
    async fn insert_project(&self, project: &ProjectInsert) -> Result<Uuid, AppError>;
    async fn get_project(&self, id: &Uuid) -> Result<Project, AppError>;
    async fn first_project_id(&self) -> Result<Option<Uuid>, AppError>;
    async fn update_project(&self, id: &Uuid, req: &UpdateProjectRequest) -> Result<Project, AppError>;
    /// Removes the project and everything it owns in one transaction,
    /// children before parent.
    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn insert_project(&self, project: &ProjectInsert) -> Result<Uuid, AppError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, name, builder_name, start_date, status, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.builder_name)
        .bind(project.start_date)
        .bind(&project.status)
        .bind(&project.description)
        .bind(project.created_at)
        .execute(&self.pool)
        .await?;

        Ok(project.id)
    }

    async fn get_project(&self, id: &Uuid) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, builder_name, start_date, status, description, created_at
            FROM projects
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        Ok(project)
    }

    async fn first_project_id(&self) -> Result<Option<Uuid>, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM projects ORDER BY created_at LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_project(&self, id: &Uuid, req: &UpdateProjectRequest) -> Result<Project, AppError> {
        // COALESCE preserves stored values for fields the request omits.
        let updated = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                name = COALESCE(?, name),
                builder_name = COALESCE(?, builder_name),
                start_date = COALESCE(?, start_date),
                status = COALESCE(?, status),
                description = COALESCE(?, description)
            WHERE id = ?
            RETURNING id, name, builder_name, start_date, status, description, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.builder_name)
        .bind(req.start_date)
        .bind(&req.status)
        .bind(&req.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        Ok(updated)
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM photos WHERE project_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM entries WHERE project_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        tx.commit().await?;
        Ok(())
    }
}
