use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::settings::ProjectDefaults;

const MAX_NAME_LENGTH: u64 = 200;
const MAX_STATUS_LENGTH: u64 = 50;

/// The single active construction project.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub builder_name: String,
    pub start_date: NaiveDate,
    pub status: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ProjectInsert {
    pub id: Uuid,
    pub name: String,
    pub builder_name: String,
    pub start_date: NaiveDate,
    pub status: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProjectInsert {
    pub fn from_defaults(defaults: &ProjectDefaults, start_date: NaiveDate) -> Self {
        ProjectInsert {
            id: Uuid::new_v4(),
            name: defaults.name.clone(),
            builder_name: defaults.builder_name.clone(),
            start_date,
            status: defaults.status.clone(),
            description: defaults.description.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub builder_name: Option<String>,

    pub start_date: Option<NaiveDate>,

    #[validate(length(min = 1, max = MAX_STATUS_LENGTH))]
    pub status: Option<String>,

    pub description: Option<String>,
}
