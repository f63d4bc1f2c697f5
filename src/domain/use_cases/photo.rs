use std::path::Path;

use chrono::{NaiveDate, Utc};
use tracing::error;
use uuid::Uuid;

use crate::{
    entities::photo::{Photo, PhotoInsert, PhotoResponse},
    errors::AppError,
    infrastructure::storage::uploads::UploadStore,
    repositories::{entry::SortOrder, photo::PhotoRepository},
};

pub struct PhotoHandler<R>
where
    R: PhotoRepository,
{
    pub photo_repo: R,
    pub uploads: UploadStore,
}

impl<R> PhotoHandler<R>
where
    R: PhotoRepository,
{
    pub fn new(photo_repo: R, uploads: UploadStore) -> Self {
        PhotoHandler { photo_repo, uploads }
    }

    /// Two-phase create: the file is persisted first, and rolled back again
    /// if the record insert fails, so record and file never diverge.
    pub async fn upload_photo(
        &self,
        project_id: Uuid,
        temp_path: &Path,
        original_name: &str,
        description: Option<String>,
        date_taken: Option<NaiveDate>,
    ) -> Result<PhotoResponse, AppError> {
        let stored = self.uploads.store(temp_path, original_name)?;

        let insert = PhotoInsert {
            id: Uuid::new_v4(),
            project_id,
            filename: stored.filename.clone(),
            original_filename: stored.original_filename,
            description: description.filter(|d| !d.trim().is_empty()),
            date_taken: date_taken.unwrap_or_else(|| Utc::now().date_naive()),
            file_size: stored.size,
            created_at: Utc::now(),
        };

        if let Err(e) = self.photo_repo.insert_photo(&insert).await {
            if let Err(cleanup) = self.uploads.remove(&stored.filename) {
                error!(filename = %stored.filename, error = %cleanup,
                       "Failed to roll back stored file after insert failure");
            }
            return Err(e);
        }

        self.photo_repo.get_photo(&insert.id).await.map(Into::into)
    }

    pub async fn get_photo(&self, id: &Uuid) -> Result<Photo, AppError> {
        self.photo_repo.get_photo(id).await
    }

    /// Newest first for the gallery view.
    pub async fn list_photos(&self, project_id: &Uuid) -> Result<Vec<PhotoResponse>, AppError> {
        let photos = self
            .photo_repo
            .list_photos(project_id, SortOrder::Descending)
            .await?;

        Ok(photos.into_iter().map(Into::into).collect())
    }

    /// Oldest first; the order the report and the export walk the gallery in.
    pub async fn list_photos_chronological(
        &self,
        project_id: &Uuid,
    ) -> Result<Vec<Photo>, AppError> {
        self.photo_repo
            .list_photos(project_id, SortOrder::Ascending)
            .await
    }

    pub async fn photo_bytes(&self, id: &Uuid) -> Result<(Photo, Vec<u8>), AppError> {
        let photo = self.photo_repo.get_photo(id).await?;
        let bytes = self.uploads.read(&photo.filename)?;
        Ok((photo, bytes))
    }

    /// Two-phase delete: the record goes first, then the file. A file that is
    /// already gone is fine; any other removal failure is reported as an
    /// inconsistency instead of being swallowed.
    pub async fn delete_photo(&self, id: &Uuid) -> Result<(), AppError> {
        let photo = self.photo_repo.get_photo(id).await?;
        self.photo_repo.delete_photo(id).await?;

        self.uploads.remove(&photo.filename).map_err(|e| {
            AppError::InternalError(format!(
                "Photo record {} was deleted but its file could not be removed: {}",
                id, e
            ))
        })
    }
}
