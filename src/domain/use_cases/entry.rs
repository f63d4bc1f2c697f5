use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::entry::{Entry, EntryCreatedResponse, EntryInsert, NewEntryRequest},
    errors::AppError,
    repositories::entry::{EntryRepository, SortOrder},
};

pub struct EntryHandler<R>
where
    R: EntryRepository,
{
    pub entry_repo: R,
}

impl<R> EntryHandler<R>
where
    R: EntryRepository,
{
    pub fn new(entry_repo: R) -> Self {
        EntryHandler { entry_repo }
    }

    pub async fn create_entry(
        &self,
        project_id: Uuid,
        req: NewEntryRequest,
    ) -> Result<EntryCreatedResponse, AppError> {
        req.validate()?;

        let insert = EntryInsert::from_request(project_id, req);
        let id = self.entry_repo.insert_entry(&insert).await?;

        Ok(EntryCreatedResponse { id })
    }

    pub async fn get_entry(&self, id: &Uuid) -> Result<Entry, AppError> {
        self.entry_repo.get_entry(id).await
    }

    /// Newest first, matching the listing the UI shows.
    pub async fn list_entries(&self, project_id: &Uuid) -> Result<Vec<Entry>, AppError> {
        self.entry_repo
            .list_entries(project_id, SortOrder::Descending)
            .await
    }

    /// Oldest first, for the export and other chronological readers.
    pub async fn list_entries_chronological(
        &self,
        project_id: &Uuid,
    ) -> Result<Vec<Entry>, AppError> {
        self.entry_repo
            .list_entries(project_id, SortOrder::Ascending)
            .await
    }

    pub async fn delete_entry(&self, id: &Uuid) -> Result<(), AppError> {
        self.entry_repo.delete_entry(id).await
    }
}
