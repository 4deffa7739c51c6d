use sqlx::PgPool;
use storage::{
    error::Result, models::SavedCompetition, repository::competition::CompetitionRepository,
    repository::entry::EntryRepository,
};
use uuid::Uuid;

/// Bookmark a competition for a user
pub async fn save_competition(
    pool: &PgPool,
    competition_id: Uuid,
    user_id: Uuid,
) -> Result<SavedCompetition> {
    CompetitionRepository::new(pool)
        .find_by_id(competition_id)
        .await?;

    EntryRepository::new(pool).save(competition_id, user_id).await
}

/// Bookmarks of a user
pub async fn list_saved(pool: &PgPool, user_id: Uuid) -> Result<Vec<SavedCompetition>> {
    EntryRepository::new(pool).list_saved(user_id).await
}
