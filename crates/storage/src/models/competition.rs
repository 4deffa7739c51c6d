use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::Difficulty;

/// Deadline token for competitions that accept entries continuously
pub const ONGOING_DEADLINE: &str = "Ongoing";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
    pub category: String,
    /// Either `Ongoing` or a calendar date
    pub deadline: String,
    /// Free text such as `$2,500` or `$1,000 Monthly`
    pub prize_value: String,
    #[sqlx(try_from = "String")]
    pub difficulty: Difficulty,
    pub requirements: String,
    pub rules: String,
    pub external_url: Option<String>,
    pub is_archived: bool,
    pub is_custom_game: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Competition {
    pub fn is_ongoing(&self) -> bool {
        self.deadline == ONGOING_DEADLINE
    }
}
