use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::project::UpdateProjectRequest, errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn get_project(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project(&state.project_id).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(state, data))]
pub async fn update_project(
    state: web::Data<AppState>,
    data: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state
        .project_handler
        .update_project(&state.project_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(state))]
pub async fn get_stats(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let stats = state.project_handler.get_stats(&state.project_id).await?;
    Ok(HttpResponse::Ok().json(stats))
}
