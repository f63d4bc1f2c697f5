use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    entities::photo::{Photo, PhotoInsert},
    errors::AppError,
    repositories::{entry::SortOrder, sqlx_repo::SqlxPhotoRepo},
};

#[async_trait]
pub trait PhotoRepository: Sync + Send {
    async fn insert_photo(&self, photo: &PhotoInsert) -> Result<Uuid, AppError>;
    async fn get_photo(&self, id: &Uuid) -> Result<Photo, AppError>;
    async fn list_photos(&self, project_id: &Uuid, order: SortOrder) -> Result<Vec<Photo>, AppError>;
    async fn delete_photo(&self, id: &Uuid) -> Result<(), AppError>;
    async fn count_photos(&self, project_id: &Uuid) -> Result<i64, AppError>;
}

impl SqlxPhotoRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqlxPhotoRepo { pool }
    }
}

#[async_trait]
impl PhotoRepository for SqlxPhotoRepo {
    async fn insert_photo(&self, photo: &PhotoInsert) -> Result<Uuid, AppError> {
        sqlx::query(
            r#"
            INSERT INTO photos (
                id, project_id, filename, original_filename, description,
                date_taken, file_size, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(photo.id)
        .bind(photo.project_id)
        .bind(&photo.filename)
        .bind(&photo.original_filename)
        .bind(&photo.description)
        .bind(photo.date_taken)
        .bind(photo.file_size)
        .bind(photo.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Stored filename already exists".into());
                }
            }
            AppError::from(e)
        })?;

        Ok(photo.id)
    }

    async fn get_photo(&self, id: &Uuid) -> Result<Photo, AppError> {
        let photo = sqlx::query_as::<_, Photo>(
            r#"
            SELECT id, project_id, filename, original_filename, description,
                   date_taken, file_size, created_at
            FROM photos
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".into()))?;

        Ok(photo)
    }

    async fn list_photos(&self, project_id: &Uuid, order: SortOrder) -> Result<Vec<Photo>, AppError> {
        let query = format!(
            r#"
            SELECT id, project_id, filename, original_filename, description,
                   date_taken, file_size, created_at
            FROM photos
            WHERE project_id = ?
            ORDER BY date_taken {}, created_at {}
            "#,
            order.sql(),
            order.sql()
        );

        let photos = sqlx::query_as::<_, Photo>(&query)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(photos)
    }

    async fn delete_photo(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM photos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Photo not found".into()));
        }

        Ok(())
    }

    async fn count_photos(&self, project_id: &Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM photos WHERE project_id = ?",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
