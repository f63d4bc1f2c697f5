use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        project::{Project, ProjectInsert, UpdateProjectRequest},
        stats::ProjectStats,
    },
    errors::AppError,
    infrastructure::storage::uploads::UploadStore,
    repositories::{
        entry::{EntryRepository, SortOrder},
        photo::PhotoRepository,
        project::ProjectRepository,
    },
    settings::ProjectDefaults,
};

pub struct ProjectHandler<P, E, Ph>
where
    P: ProjectRepository,
    E: EntryRepository,
    Ph: PhotoRepository,
{
    pub project_repo: P,
    pub entry_repo: E,
    pub photo_repo: Ph,
    pub uploads: UploadStore,
}

impl<P, E, Ph> ProjectHandler<P, E, Ph>
where
    P: ProjectRepository,
    E: EntryRepository,
    Ph: PhotoRepository,
{
    pub fn new(project_repo: P, entry_repo: E, photo_repo: Ph, uploads: UploadStore) -> Self {
        ProjectHandler {
            project_repo,
            entry_repo,
            photo_repo,
            uploads,
        }
    }

    /// Resolves the active project id once at startup: reuse the stored
    /// project if one exists, otherwise create it from the configured
    /// defaults. Request handlers receive the id and never create records
    /// implicitly.
    pub async fn ensure_active_project(
        &self,
        defaults: &ProjectDefaults,
        start_date: NaiveDate,
    ) -> Result<Uuid, AppError> {
        if let Some(id) = self.project_repo.first_project_id().await? {
            return Ok(id);
        }

        let insert = ProjectInsert::from_defaults(defaults, start_date);
        let id = self.project_repo.insert_project(&insert).await?;
        info!(project_id = %id, "Created active project from configured defaults");
        Ok(id)
    }

    pub async fn get_project(&self, id: &Uuid) -> Result<Project, AppError> {
        self.project_repo.get_project(id).await
    }

    pub async fn update_project(
        &self,
        id: &Uuid,
        req: UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        req.validate()?;
        self.project_repo.update_project(id, &req).await
    }

    /// Summary metrics for the project; pure aggregation, zero entries give
    /// zero sums.
    pub async fn get_stats(&self, id: &Uuid) -> Result<ProjectStats, AppError> {
        let project = self.project_repo.get_project(id).await?;

        let total_entries = self.entry_repo.count_entries(id).await?;
        let total_photos = self.photo_repo.count_photos(id).await?;
        let total_costs = self.entry_repo.sum_costs(id).await?;
        let total_hours = self.entry_repo.sum_work_hours(id).await?;

        Ok(ProjectStats::compute(
            total_entries,
            total_photos,
            total_costs,
            total_hours,
            project.start_date,
            Utc::now().date_naive(),
        ))
    }

    /// Removes the project, everything it owns, and the owned photo files.
    /// Files go first (a missing file is fine); the records fall in a single
    /// transaction afterwards.
    pub async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let photos = self
            .photo_repo
            .list_photos(id, SortOrder::Ascending)
            .await?;

        for photo in &photos {
            self.uploads.remove(&photo.filename)?;
        }

        self.project_repo.delete_project(id).await
    }
}
