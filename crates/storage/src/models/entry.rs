use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CompetitionEntry {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub submission_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SavedCompetition {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
