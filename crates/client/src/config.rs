use std::sync::Arc;

use uuid::Uuid;

use crate::backend::{CompetitionBackend, DatabaseBackend, HttpBackend};
use crate::session::{Session, User};
use crate::{ClientError, Result};

/// Which path competition queries take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Transport {
    /// The HTTP API and its filtering endpoint
    #[default]
    Http,
    /// The competitions tables directly
    Database,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub transport: Transport,
    pub api_url: String,
    pub api_key: Option<String>,
    pub database_url: Option<String>,
    pub user_id: Option<Uuid>,
}

impl ClientConfig {
    /// Build the backend selected by `transport`
    pub async fn backend(&self) -> Result<Arc<dyn CompetitionBackend>> {
        match self.transport {
            Transport::Http => {
                tracing::debug!(url = %self.api_url, "Using HTTP backend");
                Ok(Arc::new(HttpBackend::new(
                    self.api_url.clone(),
                    self.api_key.clone(),
                )?))
            }
            Transport::Database => {
                let url = self.database_url.as_deref().ok_or_else(|| {
                    ClientError::ConfigError(
                        "DATABASE_URL is required for the database transport".to_string(),
                    )
                })?;
                Ok(Arc::new(DatabaseBackend::connect(url).await?))
            }
        }
    }

    /// Session restored from the configured user, if any
    pub fn session(&self) -> Session {
        Session::restore(self.user_id.map(User::new))
    }
}
