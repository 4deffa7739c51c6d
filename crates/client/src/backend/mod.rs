mod database;
mod http;
#[cfg(test)]
pub(crate) mod memory;

pub use database::DatabaseBackend;
pub use http::HttpBackend;

use storage::{
    dto::{
        competition::{CreateCompetitionRequest, UpdateCompetitionRequest},
        filter::CompetitionQuery,
    },
    models::{Competition, CompetitionEntry, SavedCompetition},
};
use uuid::Uuid;

use crate::Result;

/// A place competitions are read from and written to.
///
/// `list` may leave prize and deadline buckets unevaluated; the
/// `QueryFacade` applies the full selection to whatever comes back.
#[async_trait::async_trait]
pub trait CompetitionBackend: Send + Sync {
    async fn list(&self, query: &CompetitionQuery) -> Result<Vec<Competition>>;

    async fn get(&self, id: Uuid) -> Result<Competition>;

    async fn create(&self, request: &CreateCompetitionRequest) -> Result<Competition>;

    async fn update(&self, id: Uuid, request: &UpdateCompetitionRequest) -> Result<Competition>;

    async fn set_archived(&self, id: Uuid, archived: bool) -> Result<Competition>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    async fn enter(&self, competition_id: Uuid, user_id: Uuid) -> Result<CompetitionEntry>;

    async fn save(&self, competition_id: Uuid, user_id: Uuid) -> Result<SavedCompetition>;

    fn name(&self) -> &'static str;
}
