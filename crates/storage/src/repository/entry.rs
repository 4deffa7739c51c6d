use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{CompetitionEntry, SavedCompetition};

/// Repository for user entries and bookmarks
pub struct EntryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EntryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record that `user_id` entered a competition. A second entry is a constraint violation.
    pub async fn create_entry(
        &self,
        competition_id: Uuid,
        user_id: Uuid,
        submission_data: Option<&serde_json::Value>,
    ) -> Result<CompetitionEntry> {
        let entry = sqlx::query_as::<_, CompetitionEntry>(
            r#"
            INSERT INTO competition_entries (competition_id, user_id, submission_data)
            VALUES ($1, $2, $3)
            RETURNING id, competition_id, user_id, status, submission_data, created_at, updated_at
            "#,
        )
        .bind(competition_id)
        .bind(user_id)
        .bind(submission_data)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).with_constraint_message("Competition already entered")
        })?;

        tracing::info!(%competition_id, %user_id, "Recorded competition entry");

        Ok(entry)
    }

    /// Bookmark a competition; saving twice returns the existing bookmark
    pub async fn save(&self, competition_id: Uuid, user_id: Uuid) -> Result<SavedCompetition> {
        let saved = sqlx::query_as::<_, SavedCompetition>(
            r#"
            INSERT INTO saved_competitions (competition_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (competition_id, user_id)
            DO UPDATE SET competition_id = EXCLUDED.competition_id
            RETURNING id, competition_id, user_id, created_at
            "#,
        )
        .bind(competition_id)
        .bind(user_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_message("Competition already saved"))?;

        Ok(saved)
    }

    /// Bookmarks of one user, newest first
    pub async fn list_saved(&self, user_id: Uuid) -> Result<Vec<SavedCompetition>> {
        let saved = sqlx::query_as::<_, SavedCompetition>(
            r#"
            SELECT id, competition_id, user_id, created_at
            FROM saved_competitions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(saved)
    }
}
