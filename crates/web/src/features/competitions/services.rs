use sqlx::PgPool;
use storage::{
    dto::{
        competition::{CreateCompetitionRequest, UpdateCompetitionRequest},
        filter::CompetitionQuery,
    },
    error::Result,
    models::Competition,
    repository::competition::CompetitionRepository,
    services::filter,
};
use uuid::Uuid;

/// List competitions matching every field of the query.
///
/// Category, difficulty and archive flag are evaluated by Postgres, the
/// prize and deadline buckets by the shared filter engine.
pub async fn list_competitions(pool: &PgPool, query: &CompetitionQuery) -> Result<Vec<Competition>> {
    let repo = CompetitionRepository::new(pool);
    let rows = repo.list(query).await?;

    Ok(filter::apply(&rows, &query.selection()))
}

/// Get competition by id
pub async fn get_competition(pool: &PgPool, id: Uuid) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new competition
pub async fn create_competition(
    pool: &PgPool,
    request: &CreateCompetitionRequest,
) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.create(request).await
}

/// Update a competition
pub async fn update_competition(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateCompetitionRequest,
) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.update(id, request).await
}

/// Archive or restore a competition
pub async fn set_archived(pool: &PgPool, id: Uuid, archived: bool) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.set_archived(id, archived).await
}

/// Delete a competition
pub async fn delete_competition(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = CompetitionRepository::new(pool);
    repo.delete(id).await
}
