use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use tracing::instrument;

use crate::{
    entities::{entry::Entry, photo::Photo, project::Project},
    errors::AppError,
    AppState,
};

#[derive(Serialize)]
struct ExportedPhoto {
    filename: String,
    description: Option<String>,
    date_taken: chrono::NaiveDate,
}

impl From<Photo> for ExportedPhoto {
    fn from(photo: Photo) -> Self {
        ExportedPhoto {
            filename: photo.original_filename,
            description: photo.description,
            date_taken: photo.date_taken,
        }
    }
}

#[derive(Serialize)]
struct ExportPayload {
    project: Project,
    entries: Vec<Entry>,
    photos: Vec<ExportedPhoto>,
}

/// Whole-project JSON export: profile, the full chronological entry log, and
/// photo metadata (not the image files themselves).
#[instrument(skip(state))]
pub async fn export_data(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project(&state.project_id).await?;

    let entries = state
        .entry_handler
        .list_entries_chronological(&state.project_id)
        .await?;

    let photos = state
        .photo_handler
        .list_photos_chronological(&state.project_id)
        .await?;

    let payload = ExportPayload {
        project,
        entries,
        photos: photos.into_iter().map(Into::into).collect(),
    };

    Ok(HttpResponse::Ok().json(payload))
}
