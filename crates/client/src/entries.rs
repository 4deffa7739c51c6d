use storage::models::{CompetitionEntry, SavedCompetition};
use uuid::Uuid;

use crate::backend::CompetitionBackend;
use crate::session::Session;
use crate::Result;

/// Enter a competition as the signed-in user
pub async fn enter(
    backend: &dyn CompetitionBackend,
    session: &Session,
    competition_id: Uuid,
) -> Result<CompetitionEntry> {
    let user = session.require_user().await?;
    let entry = backend.enter(competition_id, user.id).await?;
    tracing::info!(%competition_id, user_id = %user.id, "Entered competition");
    Ok(entry)
}

/// Bookmark a competition for the signed-in user
pub async fn save(
    backend: &dyn CompetitionBackend,
    session: &Session,
    competition_id: Uuid,
) -> Result<SavedCompetition> {
    let user = session.require_user().await?;
    let saved = backend.save(competition_id, user.id).await?;
    tracing::info!(%competition_id, user_id = %user.id, "Saved competition");
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use storage::fixtures::sample_competitions;

    use super::*;
    use crate::backend::memory::MemoryBackend;
    use crate::session::User;
    use crate::ClientError;

    #[tokio::test]
    async fn test_enter_requires_sign_in() {
        let backend = MemoryBackend::with_rows(sample_competitions());
        let session = Session::new();

        let result = enter(&backend, &session, Uuid::from_u128(1)).await;

        assert!(matches!(result, Err(ClientError::Unauthenticated)));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_enter_records_user() {
        let backend = MemoryBackend::with_rows(sample_competitions());
        let user = User::new(Uuid::from_u128(99));
        let session = Session::restore(Some(user.clone()));

        let entry = enter(&backend, &session, Uuid::from_u128(2)).await.unwrap();

        assert_eq!(entry.user_id, user.id);
        assert_eq!(backend.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_save_unknown_competition_fails() {
        let backend = MemoryBackend::with_rows(sample_competitions());
        let session = Session::restore(Some(User::new(Uuid::from_u128(99))));

        let result = save(&backend, &session, Uuid::from_u128(1_000)).await;

        assert!(result.is_err());
    }
}
