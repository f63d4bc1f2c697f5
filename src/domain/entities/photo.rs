use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A gallery photo. The record and its on-disk file are co-owned and are
/// created and deleted together.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Photo {
    pub id: Uuid,
    pub project_id: Uuid,
    pub filename: String,
    pub original_filename: String,
    pub description: Option<String>,
    pub date_taken: NaiveDate,
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, MultipartForm)]
pub struct PhotoUploadForm {
    #[multipart(limit = "16MB")]
    pub file: TempFile,

    pub description: Option<Text<String>>,

    /// ISO date; defaults to the upload date when omitted.
    pub date_taken: Option<Text<NaiveDate>>,
}

#[derive(Debug)]
pub struct PhotoInsert {
    pub id: Uuid,
    pub project_id: Uuid,
    pub filename: String,
    pub original_filename: String,
    pub description: Option<String>,
    pub date_taken: NaiveDate,
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
}

/// `Photo` plus the URL the shell serves its bytes from.
#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    #[serde(flatten)]
    pub photo: Photo,
    pub url: String,
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        let url = format!("/api/v1/photos/{}/file", photo.id);
        PhotoResponse { photo, url }
    }
}
