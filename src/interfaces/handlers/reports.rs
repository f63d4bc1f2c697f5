use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::{errors::AppError, AppState};

fn pdf_attachment(bytes: Vec<u8>, filename: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes)
}

#[instrument(skip(state))]
pub async fn full_report(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let (bytes, filename) = state
        .report_handler
        .render_full_report(&state.project_id)
        .await?;

    Ok(pdf_attachment(bytes, filename))
}

#[instrument(skip(state))]
pub async fn entry_report(
    entry_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let (bytes, filename) = state.report_handler.render_entry_report(&entry_id).await?;

    Ok(pdf_attachment(bytes, filename))
}
