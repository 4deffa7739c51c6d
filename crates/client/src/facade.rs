use std::sync::Arc;

use chrono::{DateTime, Utc};
use storage::{
    dto::filter::{CompetitionQuery, FilterSelection, ListOrder},
    models::Competition,
    services::filter,
};

use crate::backend::CompetitionBackend;
use crate::Result;

/// Turns a filter selection into a backend request and finishes the
/// filtering locally, so every backend yields the same records.
#[derive(Clone)]
pub struct QueryFacade {
    backend: Arc<dyn CompetitionBackend>,
}

impl QueryFacade {
    pub fn new(backend: Arc<dyn CompetitionBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn CompetitionBackend {
        self.backend.as_ref()
    }

    /// Competitions matching `selection` in the active or archived listing
    pub async fn fetch(
        &self,
        selection: &FilterSelection,
        archived: bool,
        order: ListOrder,
    ) -> Result<Vec<Competition>> {
        let query = CompetitionQuery::new(selection.clone(), archived, order);
        self.fetch_at(&query, Utc::now()).await
    }

    /// Like `fetch`, with deadline buckets evaluated at `now`
    pub async fn fetch_at(
        &self,
        query: &CompetitionQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<Competition>> {
        let rows = self.backend.list(query).await.inspect_err(|e| {
            tracing::warn!(backend = self.backend.name(), error = %e, "Fetching competitions failed");
        })?;

        let fetched = rows.len();
        let mut competitions = filter::apply_at(&rows, &query.selection(), now);

        if query.order == ListOrder::Newest {
            competitions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        tracing::debug!(
            backend = self.backend.name(),
            fetched,
            kept = competitions.len(),
            "Fetched competitions"
        );

        Ok(competitions)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use storage::dto::filter::{DeadlineWindow, PrizeRange};
    use storage::fixtures::sample_competitions;

    use super::*;
    use crate::backend::memory::MemoryBackend;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
    }

    fn titles(records: &[Competition]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    fn facade() -> (Arc<MemoryBackend>, QueryFacade) {
        let backend = Arc::new(MemoryBackend::with_rows(sample_competitions()));
        (backend.clone(), QueryFacade::new(backend))
    }

    #[tokio::test]
    async fn test_applies_buckets_the_backend_skips() {
        let (_, facade) = facade();
        let selection = FilterSelection::all()
            .with_category("Technology")
            .with_prize_range(PrizeRange::High);
        let query = CompetitionQuery::new(selection, false, ListOrder::Store);

        let result = facade.fetch_at(&query, now()).await.unwrap();

        assert_eq!(
            titles(&result),
            vec!["Mobile App Innovation Challenge", "Game Development Hackathon"]
        );
    }

    #[tokio::test]
    async fn test_matches_local_engine() {
        let (_, facade) = facade();
        let selection = FilterSelection::all().with_deadline(DeadlineWindow::Month);
        let query = CompetitionQuery::new(selection.clone(), false, ListOrder::Store);

        let remote = facade.fetch_at(&query, now()).await.unwrap();
        let local = filter::apply_at(&sample_competitions(), &selection, now());

        assert_eq!(remote, local);
    }

    #[tokio::test]
    async fn test_newest_first_ordering() {
        let (_, facade) = facade();
        let query = CompetitionQuery::new(FilterSelection::all(), false, ListOrder::Newest);

        let result = facade.fetch_at(&query, now()).await.unwrap();

        assert_eq!(result.first().unwrap().title, "Fitness Challenge");
        assert_eq!(result.last().unwrap().title, "Summer Photography Contest");
    }

    #[tokio::test]
    async fn test_archived_rows_are_separate() {
        let (backend, facade) = facade();
        backend
            .set_archived(uuid::Uuid::from_u128(1), true)
            .await
            .unwrap();

        let archived = facade
            .fetch(&FilterSelection::all(), true, ListOrder::Store)
            .await
            .unwrap();
        assert_eq!(titles(&archived), vec!["Summer Photography Contest"]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_error() {
        let (backend, facade) = facade();
        backend.set_offline(true);

        let result = facade
            .fetch(&FilterSelection::all(), false, ListOrder::Store)
            .await;

        assert!(matches!(
            result,
            Err(crate::ClientError::BackendError { status: 503, .. })
        ));
    }
}
