use storage::{
    Database,
    dto::{
        competition::{CreateCompetitionRequest, UpdateCompetitionRequest},
        filter::CompetitionQuery,
    },
    models::{Competition, CompetitionEntry, SavedCompetition},
    repository::{competition::CompetitionRepository, entry::EntryRepository},
};
use uuid::Uuid;

use super::CompetitionBackend;
use crate::Result;

/// Reads and writes the competitions tables directly
pub struct DatabaseBackend {
    db: Database,
}

impl DatabaseBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        let db = Database::new(database_url).await?;
        Ok(Self::new(db))
    }

    fn competitions(&self) -> CompetitionRepository<'_> {
        CompetitionRepository::new(self.db.pool())
    }

    fn entries(&self) -> EntryRepository<'_> {
        EntryRepository::new(self.db.pool())
    }
}

#[async_trait::async_trait]
impl CompetitionBackend for DatabaseBackend {
    async fn list(&self, query: &CompetitionQuery) -> Result<Vec<Competition>> {
        tracing::debug!(?query, "Querying competitions table");
        Ok(self.competitions().list(query).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Competition> {
        Ok(self.competitions().find_by_id(id).await?)
    }

    async fn create(&self, request: &CreateCompetitionRequest) -> Result<Competition> {
        Ok(self.competitions().create(request).await?)
    }

    async fn update(&self, id: Uuid, request: &UpdateCompetitionRequest) -> Result<Competition> {
        Ok(self.competitions().update(id, request).await?)
    }

    async fn set_archived(&self, id: Uuid, archived: bool) -> Result<Competition> {
        Ok(self.competitions().set_archived(id, archived).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        Ok(self.competitions().delete(id).await?)
    }

    async fn enter(&self, competition_id: Uuid, user_id: Uuid) -> Result<CompetitionEntry> {
        self.competitions().find_by_id(competition_id).await?;
        Ok(self
            .entries()
            .create_entry(competition_id, user_id, None)
            .await?)
    }

    async fn save(&self, competition_id: Uuid, user_id: Uuid) -> Result<SavedCompetition> {
        self.competitions().find_by_id(competition_id).await?;
        Ok(self.entries().save(competition_id, user_id).await?)
    }

    fn name(&self) -> &'static str {
        "database"
    }
}
