use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::Utc;
use storage::{
    dto::{
        competition::{CreateCompetitionRequest, UpdateCompetitionRequest},
        filter::{CompetitionQuery, ListOrder},
    },
    error::StorageError,
    models::{Competition, CompetitionEntry, SavedCompetition},
};
use uuid::Uuid;

use super::CompetitionBackend;
use crate::error::{ClientError, Result};

/// In-memory backend that behaves like the table path: equality filters
/// only, optional newest-first ordering.
#[derive(Default)]
pub struct MemoryBackend {
    rows: Mutex<Vec<Competition>>,
    entries: Mutex<Vec<CompetitionEntry>>,
    offline: AtomicBool,
    listing_offline: AtomicBool,
    calls: AtomicUsize,
}

impl MemoryBackend {
    pub fn with_rows(rows: Vec<Competition>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    /// Make every following call fail like a dropped connection
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Make only `list` fail, so writes succeed but reloads do not
    pub fn set_listing_offline(&self, offline: bool) {
        self.listing_offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<Competition> {
        self.rows.lock().unwrap().clone()
    }

    pub fn entries(&self) -> Vec<CompetitionEntry> {
        self.entries.lock().unwrap().clone()
    }

    fn call(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ClientError::BackendError {
                status: 503,
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    fn modify<T>(&self, id: Uuid, change: impl FnOnce(&mut Competition) -> T) -> Result<T> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StorageError::NotFound)?;
        Ok(change(row))
    }
}

#[async_trait::async_trait]
impl CompetitionBackend for MemoryBackend {
    async fn list(&self, query: &CompetitionQuery) -> Result<Vec<Competition>> {
        self.call()?;
        if self.listing_offline.load(Ordering::SeqCst) {
            return Err(ClientError::BackendError {
                status: 503,
                message: "listing unavailable".to_string(),
            });
        }
        let mut rows: Vec<Competition> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.is_archived == query.archived)
            .filter(|row| query.category.as_ref().is_none_or(|c| &row.category == c))
            .filter(|row| query.difficulty.is_none_or(|d| row.difficulty == d))
            .cloned()
            .collect();

        if query.order == ListOrder::Newest {
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Competition> {
        self.call()?;
        self.modify(id, |row| row.clone())
    }

    async fn create(&self, request: &CreateCompetitionRequest) -> Result<Competition> {
        self.call()?;
        let now = Utc::now();
        let competition = Competition {
            id: Uuid::new_v4(),
            title: request.title.clone(),
            image_url: request.image_url.clone(),
            category: request.category.clone(),
            deadline: request.deadline.clone(),
            prize_value: request.prize_value.clone(),
            difficulty: request.difficulty(),
            requirements: request.requirements.clone(),
            rules: request.rules.clone(),
            external_url: request.external_url().map(str::to_string),
            is_archived: false,
            is_custom_game: request.is_custom_game,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(competition.clone());
        Ok(competition)
    }

    async fn update(&self, id: Uuid, request: &UpdateCompetitionRequest) -> Result<Competition> {
        self.call()?;
        self.modify(id, |row| {
            if let Some(title) = &request.title {
                row.title = title.clone();
            }
            if let Some(category) = &request.category {
                row.category = category.clone();
            }
            if let Some(prize_value) = &request.prize_value {
                row.prize_value = prize_value.clone();
            }
            if let Some(deadline) = &request.deadline {
                row.deadline = deadline.clone();
            }
            if let Some(difficulty) = request.difficulty.as_deref().and_then(|d| d.parse().ok()) {
                row.difficulty = difficulty;
            }
            if let Some(image_url) = &request.image_url {
                row.image_url = image_url.clone();
            }
            if let Some(requirements) = &request.requirements {
                row.requirements = requirements.clone();
            }
            if let Some(rules) = &request.rules {
                row.rules = rules.clone();
            }
            if let Some(external_url) = &request.external_url {
                row.external_url = (!external_url.is_empty()).then(|| external_url.clone());
            }
            if let Some(is_custom_game) = request.is_custom_game {
                row.is_custom_game = is_custom_game;
            }
            row.updated_at = Utc::now();
            row.clone()
        })
    }

    async fn set_archived(&self, id: Uuid, archived: bool) -> Result<Competition> {
        self.call()?;
        self.modify(id, |row| {
            row.is_archived = archived;
            row.clone()
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.call()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(StorageError::NotFound.into());
        }
        Ok(())
    }

    async fn enter(&self, competition_id: Uuid, user_id: Uuid) -> Result<CompetitionEntry> {
        self.call()?;
        self.modify(competition_id, |_| ())?;
        let now = Utc::now();
        let entry = CompetitionEntry {
            id: Uuid::new_v4(),
            competition_id,
            user_id,
            status: "submitted".to_string(),
            submission_data: None,
            created_at: now,
            updated_at: now,
        };
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn save(&self, competition_id: Uuid, user_id: Uuid) -> Result<SavedCompetition> {
        self.call()?;
        self.modify(competition_id, |_| ())?;
        Ok(SavedCompetition {
            id: Uuid::new_v4(),
            competition_id,
            user_id,
            created_at: Utc::now(),
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
