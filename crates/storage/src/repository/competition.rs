use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::competition::{CreateCompetitionRequest, UpdateCompetitionRequest};
use crate::dto::filter::{CompetitionQuery, ListOrder};
use crate::error::{Result, StorageError};
use crate::models::Competition;

const COLUMNS: &str = "id, title, image_url, category, deadline, prize_value, difficulty, \
     requirements, rules, external_url, is_archived, is_custom_game, created_at, updated_at";

/// Repository for Competition database operations
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    /// Create a new CompetitionRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List competitions, pushing the equality filters and ordering into SQL.
    ///
    /// Prize and deadline buckets are not evaluated here; run the result
    /// through `services::filter` for those.
    pub async fn list(&self, query: &CompetitionQuery) -> Result<Vec<Competition>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(COLUMNS);
        builder.push(" FROM competitions WHERE is_archived = ");
        builder.push_bind(query.archived);

        if let Some(category) = &query.category {
            builder.push(" AND category = ");
            builder.push_bind(category);
        }

        if let Some(difficulty) = query.difficulty {
            builder.push(" AND difficulty = ");
            builder.push_bind(difficulty.as_str());
        }

        if query.order == ListOrder::Newest {
            builder.push(" ORDER BY created_at DESC");
        }

        let competitions = builder
            .build_query_as::<Competition>()
            .fetch_all(self.pool)
            .await?;

        tracing::debug!(count = competitions.len(), "Listed competitions");

        Ok(competitions)
    }

    /// Get a competition by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(&format!(
            "SELECT {COLUMNS} FROM competitions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    /// Create a new competition
    pub async fn create(&self, req: &CreateCompetitionRequest) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(&format!(
            r#"
            INSERT INTO competitions (
                title, image_url, category, deadline, prize_value, difficulty,
                requirements, rules, external_url, is_custom_game
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.title)
        .bind(&req.image_url)
        .bind(&req.category)
        .bind(&req.deadline)
        .bind(&req.prize_value)
        .bind(req.difficulty().as_str())
        .bind(&req.requirements)
        .bind(&req.rules)
        .bind(req.external_url())
        .bind(req.is_custom_game)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_message("Competition already exists"))?;

        tracing::info!(id = %competition.id, title = %competition.title, "Created competition");

        Ok(competition)
    }

    /// Update an existing competition; `None` fields keep their stored value
    pub async fn update(&self, id: Uuid, req: &UpdateCompetitionRequest) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(&format!(
            r#"
            UPDATE competitions
            SET
                title = COALESCE($2, title),
                image_url = COALESCE($3, image_url),
                category = COALESCE($4, category),
                deadline = COALESCE($5, deadline),
                prize_value = COALESCE($6, prize_value),
                difficulty = COALESCE($7, difficulty),
                requirements = COALESCE($8, requirements),
                rules = COALESCE($9, rules),
                external_url = CASE WHEN $10::TEXT IS NULL THEN external_url ELSE NULLIF($10, '') END,
                is_custom_game = COALESCE($11, is_custom_game),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&req.title)
        .bind(&req.image_url)
        .bind(&req.category)
        .bind(&req.deadline)
        .bind(&req.prize_value)
        .bind(&req.difficulty)
        .bind(&req.requirements)
        .bind(&req.rules)
        .bind(&req.external_url)
        .bind(req.is_custom_game)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_message("Competition already exists"))?
        .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    /// Move a competition in or out of the archive
    pub async fn set_archived(&self, id: Uuid, archived: bool) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(&format!(
            r#"
            UPDATE competitions
            SET is_archived = $2, updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(archived)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        tracing::info!(%id, archived, "Changed competition archive flag");

        Ok(competition)
    }

    /// Delete a competition by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM competitions WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tracing::info!(%id, "Deleted competition");

        Ok(())
    }
}
