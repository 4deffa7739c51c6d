use sqlx::PgPool;
use storage::{
    error::Result, models::CompetitionEntry, repository::competition::CompetitionRepository,
    repository::entry::EntryRepository,
};
use uuid::Uuid;

/// Record an entry for a competition that is still listed
pub async fn enter_competition(
    pool: &PgPool,
    competition_id: Uuid,
    user_id: Uuid,
    submission_data: Option<&serde_json::Value>,
) -> Result<CompetitionEntry> {
    CompetitionRepository::new(pool)
        .find_by_id(competition_id)
        .await?;

    EntryRepository::new(pool)
        .create_entry(competition_id, user_id, submission_data)
        .await
}
