use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    entities::{entry::Entry, project::Project, stats::ProjectStats},
    errors::{AppError, ReportError},
    infrastructure::{
        report::{
            document::{self, PhotoSlot, DOCUMENT_TITLE},
            load_photo_image,
            pdf::PdfWriter,
            suggested_filename,
        },
        storage::uploads::UploadStore,
    },
    repositories::{
        entry::{EntryRepository, SortOrder},
        photo::PhotoRepository,
        project::ProjectRepository,
    },
};

/// Renders stored records into downloadable PDF documents. A one-shot,
/// synchronous transformation: not-found and serialization failures abort the
/// render, individual photo failures degrade to in-document placeholders.
pub struct ReportHandler<P, E, Ph>
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

impl<P, E, Ph> ReportHandler<P, E, Ph>
where
    P: ProjectRepository,
    E: EntryRepository,
    Ph: PhotoRepository,
{
    pub fn new(project_repo: P, entry_repo: E, photo_repo: Ph, uploads: UploadStore) -> Self {
        ReportHandler {
            project_repo,
            entry_repo,
            photo_repo,
            uploads,
        }
    }

    /// Full project report: project info, statistics, every entry ascending
    /// by date, and the photo gallery.
    #[instrument(skip(self))]
    pub async fn render_full_report(
        &self,
        project_id: &Uuid,
    ) -> Result<(Vec<u8>, String), ReportError> {
        let project = self
            .project_repo
            .get_project(project_id)
            .await
            .map_err(project_fetch_error)?;

        let entries = self
            .entry_repo
            .list_entries(project_id, SortOrder::Ascending)
            .await
            .map_err(store_error)?;

        let photos = self
            .photo_repo
            .list_photos(project_id, SortOrder::Ascending)
            .await
            .map_err(store_error)?;

        let today = Utc::now().date_naive();
        let stats = aggregate_stats(&project, &entries, photos.len() as i64, today);
        let filename = suggested_filename("construction_diary", &project.name, today);

        let uploads = self.uploads.clone();
        let photo_count = photos.len();
        let doc_stats = stats.clone();

        // Image decoding and PDF assembly are blocking work.
        let bytes = tokio::task::spawn_blocking(move || {
            let slots: Vec<PhotoSlot> = photos
                .into_iter()
                .map(|photo| {
                    let outcome = load_photo_image(&uploads.path_of(&photo.filename));
                    PhotoSlot { photo, outcome }
                })
                .collect();

            let blocks = document::full_report(&project, &doc_stats, &entries, slots);
            PdfWriter::render(DOCUMENT_TITLE, &blocks)
        })
        .await
        .map_err(|e| ReportError::Pdf(format!("Render task failed: {e}")))??;

        info!(
            entries = stats.total_entries,
            photos = photo_count,
            size = bytes.len(),
            "Rendered full project report"
        );

        Ok((bytes, filename))
    }

    /// Standalone document for one entry, without statistics or photos.
    #[instrument(skip(self))]
    pub async fn render_entry_report(
        &self,
        entry_id: &Uuid,
    ) -> Result<(Vec<u8>, String), ReportError> {
        let entry = self
            .entry_repo
            .get_entry(entry_id)
            .await
            .map_err(entry_fetch_error)?;

        let project = self
            .project_repo
            .get_project(&entry.project_id)
            .await
            .map_err(project_fetch_error)?;

        let filename = suggested_filename("diary_entry", &project.name, entry.date);

        let bytes = tokio::task::spawn_blocking(move || {
            let blocks = document::entry_report(&project, &entry);
            PdfWriter::render(DOCUMENT_TITLE, &blocks)
        })
        .await
        .map_err(|e| ReportError::Pdf(format!("Render task failed: {e}")))??;

        Ok((bytes, filename))
    }
}

/// The report aggregates over the entry list it is about to render, so the
/// statistics block always matches the entries section of the same document.
fn aggregate_stats(
    project: &Project,
    entries: &[Entry],
    photo_count: i64,
    today: chrono::NaiveDate,
) -> ProjectStats {
    let total_costs: f64 = entries.iter().filter_map(|e| e.costs).sum();
    let total_hours: f64 = entries.iter().filter_map(|e| e.work_hours).sum();

    ProjectStats::compute(
        entries.len() as i64,
        photo_count,
        total_costs,
        total_hours,
        project.start_date,
        today,
    )
}

fn project_fetch_error(err: AppError) -> ReportError {
    match err {
        AppError::NotFound(_) => ReportError::ProjectNotFound,
        other => ReportError::Store(other.to_string()),
    }
}

fn entry_fetch_error(err: AppError) -> ReportError {
    match err {
        AppError::NotFound(_) => ReportError::EntryNotFound,
        other => ReportError::Store(other.to_string()),
    }
}

fn store_error(err: AppError) -> ReportError {
    ReportError::Store(err.to_string())
}
