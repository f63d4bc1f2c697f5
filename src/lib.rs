mod domain;
mod infrastructure;
mod interfaces;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{db, report, storage};
pub use interfaces::{handlers, repositories, routes};

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use errors::AppError;
use repositories::sqlx_repo::{SqlxEntryRepo, SqlxPhotoRepo, SqlxProjectRepo};
use settings::AppConfig;
use storage::uploads::UploadStore;
use use_cases::{
    entry::EntryHandler, photo::PhotoHandler, project::ProjectHandler, report::ReportHandler,
};

pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo, SqlxEntryRepo, SqlxPhotoRepo>;
pub type AppEntryHandler = EntryHandler<SqlxEntryRepo>;
pub type AppPhotoHandler = PhotoHandler<SqlxPhotoRepo>;
pub type AppReportHandler = ReportHandler<SqlxProjectRepo, SqlxEntryRepo, SqlxPhotoRepo>;

pub struct AppState {
    /// The active project; resolved once at startup and threaded through
    /// every handler call.
    pub project_id: Uuid,
    pub project_handler: AppProjectHandler,
    pub entry_handler: AppEntryHandler,
    pub photo_handler: AppPhotoHandler,
    pub report_handler: AppReportHandler,
}

impl AppState {
    /// Builds the handler graph and makes sure the active project exists,
    /// creating it from the configured defaults when the store is empty.
    pub async fn initialize(config: &AppConfig, pool: SqlitePool) -> Result<Self, AppError> {
        let uploads = UploadStore::new(&config.upload_dir, config.max_upload_bytes)?;

        let project_handler = ProjectHandler::new(
            SqlxProjectRepo::new(pool.clone()),
            SqlxEntryRepo::new(pool.clone()),
            SqlxPhotoRepo::new(pool.clone()),
            uploads.clone(),
        );
        let entry_handler = EntryHandler::new(SqlxEntryRepo::new(pool.clone()));
        let photo_handler = PhotoHandler::new(SqlxPhotoRepo::new(pool.clone()), uploads.clone());
        let report_handler = ReportHandler::new(
            SqlxProjectRepo::new(pool.clone()),
            SqlxEntryRepo::new(pool.clone()),
            SqlxPhotoRepo::new(pool),
            uploads,
        );

        let project_id = project_handler
            .ensure_active_project(&config.project, Utc::now().date_naive())
            .await?;

        Ok(AppState {
            project_id,
            project_handler,
            entry_handler,
            photo_handler,
            report_handler,
        })
    }
}
