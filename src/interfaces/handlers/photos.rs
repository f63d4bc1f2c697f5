use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::{entities::photo::PhotoUploadForm, errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn list_photos(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let photos = state.photo_handler.list_photos(&state.project_id).await?;
    Ok(HttpResponse::Ok().json(photos))
}

#[instrument(skip(state, form))]
pub async fn upload_photo(
    state: web::Data<AppState>,
    form: MultipartForm<PhotoUploadForm>,
) -> Result<impl Responder, AppError> {
    let form = form.into_inner();

    let original_name = form
        .file
        .file_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("No file was provided".into()))?;

    let photo = state
        .photo_handler
        .upload_photo(
            state.project_id,
            form.file.file.path(),
            &original_name,
            form.description.map(|d| d.into_inner()),
            form.date_taken.map(|d| d.into_inner()),
        )
        .await?;

    Ok(HttpResponse::Created().json(photo))
}

#[instrument(skip(state))]
pub async fn serve_photo_file(
    photo_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let (photo, bytes) = state.photo_handler.photo_bytes(&photo_id).await?;

    let content_type = infer::get(&bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream");

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((
            "Content-Disposition",
            format!("inline; filename=\"{}\"", photo.original_filename),
        ))
        .body(bytes))
}

#[instrument(skip(state))]
pub async fn delete_photo(
    photo_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.photo_handler.delete_photo(&photo_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
