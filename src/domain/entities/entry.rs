use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

const MAX_WEATHER_LENGTH: u64 = 50;

/// One day of work on the project. Entries are immutable once created;
/// creation and deletion are the only mutators.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Entry {
    pub id: Uuid,
    pub project_id: Uuid,
    pub date: NaiveDate,
    pub weather: Option<String>,
    pub temperature: Option<f64>,
    pub content: String,
    pub workers_count: Option<i64>,
    pub materials: Option<String>,
    pub work_hours: Option<f64>,
    pub costs: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewEntryRequest {
    pub date: NaiveDate,

    #[validate(length(max = MAX_WEATHER_LENGTH))]
    pub weather: Option<String>,

    pub temperature: Option<f64>,

    #[validate(length(min = 1, message = "Work description cannot be empty"))]
    pub content: String,

    #[validate(range(min = 0, message = "Worker count cannot be negative"))]
    pub workers_count: Option<i64>,

    pub materials: Option<String>,

    #[validate(range(min = 0.0, message = "Work hours cannot be negative"))]
    pub work_hours: Option<f64>,

    #[validate(range(min = 0.0, message = "Costs cannot be negative"))]
    pub costs: Option<f64>,

    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct EntryInsert {
    pub id: Uuid,
    pub project_id: Uuid,
    pub date: NaiveDate,
    pub weather: Option<String>,
    pub temperature: Option<f64>,
    pub content: String,
    pub workers_count: Option<i64>,
    pub materials: Option<String>,
    pub work_hours: Option<f64>,
    pub costs: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl EntryInsert {
    pub fn from_request(project_id: Uuid, req: NewEntryRequest) -> Self {
        EntryInsert {
            id: Uuid::new_v4(),
            project_id,
            date: req.date,
            weather: req.weather,
            temperature: req.temperature,
            content: req.content,
            workers_count: req.workers_count,
            materials: req.materials,
            work_hours: req.work_hours,
            costs: req.costs,
            notes: req.notes,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EntryCreatedResponse {
    pub id: Uuid,
}
