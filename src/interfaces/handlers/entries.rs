use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::{entities::entry::NewEntryRequest, errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn list_entries(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let entries = state.entry_handler.list_entries(&state.project_id).await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[instrument(skip(state, data))]
pub async fn create_entry(
    state: web::Data<AppState>,
    data: web::Json<NewEntryRequest>,
) -> Result<impl Responder, AppError> {
    let response = state
        .entry_handler
        .create_entry(state.project_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state))]
pub async fn get_entry(
    entry_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let entry = state.entry_handler.get_entry(&entry_id).await?;
    Ok(HttpResponse::Ok().json(entry))
}

#[instrument(skip(state))]
pub async fn delete_entry(
    entry_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.entry_handler.delete_entry(&entry_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
