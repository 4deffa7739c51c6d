use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ClientError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
}

impl User {
    pub fn new(id: Uuid) -> Self {
        Self { id, email: None }
    }
}

/// The signed-in user, shared by every view that needs it.
///
/// Clones share the same state; sign-in and sign-out are visible through all of them.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Arc<RwLock<Option<User>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session resolved at start-up
    pub fn restore(user: Option<User>) -> Self {
        if let Some(user) = &user {
            tracing::debug!(user_id = %user.id, "Restored session");
        }
        Self {
            current: Arc::new(RwLock::new(user)),
        }
    }

    pub async fn sign_in(&self, user: User) {
        tracing::info!(user_id = %user.id, "Signed in");
        *self.current.write().await = Some(user);
    }

    /// Clear the session, returning the user that was signed in
    pub async fn sign_out(&self) -> Option<User> {
        let previous = self.current.write().await.take();
        if let Some(user) = &previous {
            tracing::info!(user_id = %user.id, "Signed out");
        }
        previous
    }

    pub async fn current(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn require_user(&self) -> Result<User> {
        self.current().await.ok_or(ClientError::Unauthenticated)
    }
}
