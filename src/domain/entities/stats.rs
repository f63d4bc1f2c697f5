use chrono::NaiveDate;
use serde::Serialize;

/// Placeholder completion percentage; there is no derivation logic behind it.
pub const COMPLETION_PLACEHOLDER: i64 = 65;

/// Summary metrics over the active project's entries and photos. A pure
/// function of stored state and an explicit reference date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectStats {
    pub total_entries: i64,
    pub total_photos: i64,
    pub project_days: i64,
    pub total_costs: f64,
    pub total_hours: f64,
    pub completion: i64,
}

impl ProjectStats {
    pub fn compute(
        total_entries: i64,
        total_photos: i64,
        total_costs: f64,
        total_hours: f64,
        start_date: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        let project_days = (today - start_date).num_days() + 1;

        ProjectStats {
            total_entries,
            total_photos,
            project_days,
            total_costs,
            total_hours,
            completion: COMPLETION_PLACEHOLDER,
        }
    }
}
