use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use storage::{
    dto::{
        competition::{ArchiveRequest, CreateCompetitionRequest, UpdateCompetitionRequest},
        entry::CreateEntryRequest,
        filter::CompetitionQuery,
    },
    models::{Competition, CompetitionEntry, SavedCompetition},
};
use uuid::Uuid;

use super::CompetitionBackend;
use crate::error::{ClientError, Result};

const USER_ID_HEADER: &str = "x-user-id";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Vec<String>,
}

/// Talks to the competitions HTTP API. Filtering goes through `GET /api/competitions`.
pub struct HttpBackend {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    fn competitions_url(&self) -> String {
        format!("{}/api/competitions", self.base_url)
    }

    fn competition_url(&self, id: Uuid) -> String {
        format!("{}/api/competitions/{}", self.base_url, id)
    }

    fn admin(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) if body.details.is_empty() => body.error,
            Ok(body) => format!("{} ({})", body.error, body.details.join(", ")),
            Err(_) if text.is_empty() => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            Err(_) => text,
        };

        tracing::warn!(status = status.as_u16(), %message, "Competitions API returned an error");

        Err(ClientError::BackendError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait::async_trait]
impl CompetitionBackend for HttpBackend {
    async fn list(&self, query: &CompetitionQuery) -> Result<Vec<Competition>> {
        tracing::debug!(?query, "Fetching competitions over HTTP");
        let response = self
            .client
            .get(self.competitions_url())
            .query(query)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn get(&self, id: Uuid) -> Result<Competition> {
        let response = self.client.get(self.competition_url(id)).send().await?;
        Self::decode(response).await
    }

    async fn create(&self, request: &CreateCompetitionRequest) -> Result<Competition> {
        let response = self
            .admin(self.client.post(self.competitions_url()))
            .json(request)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn update(&self, id: Uuid, request: &UpdateCompetitionRequest) -> Result<Competition> {
        let response = self
            .admin(self.client.put(self.competition_url(id)))
            .json(request)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn set_archived(&self, id: Uuid, archived: bool) -> Result<Competition> {
        let response = self
            .admin(
                self.client
                    .put(format!("{}/archive", self.competition_url(id))),
            )
            .json(&ArchiveRequest { archived })
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let response = self
            .admin(self.client.delete(self.competition_url(id)))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn enter(&self, competition_id: Uuid, user_id: Uuid) -> Result<CompetitionEntry> {
        let response = self
            .client
            .post(format!("{}/entries", self.competition_url(competition_id)))
            .header(USER_ID_HEADER, user_id.to_string())
            .json(&CreateEntryRequest::default())
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn save(&self, competition_id: Uuid, user_id: Uuid) -> Result<SavedCompetition> {
        let response = self
            .client
            .post(format!("{}/saves", self.competition_url(competition_id)))
            .header(USER_ID_HEADER, user_id.to_string())
            .send()
            .await?;

        Self::decode(response).await
    }

    fn name(&self) -> &'static str {
        "HTTP API"
    }
}
