use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::entry::CreateEntryRequest, models::CompetitionEntry};
use uuid::Uuid;

use crate::error::{WebError, WebResult};
use crate::middleware::identity::CallerIdentity;

use super::services;

#[utoipa::path(
    post,
    path = "/api/competitions/{id}/entries",
    params(
        ("id" = Uuid, Path, description = "Competition id"),
        ("x-user-id" = Uuid, Header, description = "Signed-in user")
    ),
    request_body = Option<CreateEntryRequest>,
    responses(
        (status = 201, description = "Entry recorded", body = CompetitionEntry),
        (status = 401, description = "No signed-in user"),
        (status = 404, description = "Competition not found"),
        (status = 409, description = "Competition already entered")
    ),
    tag = "entries"
)]
pub async fn enter_competition(
    State(db): State<Database>,
    CallerIdentity(user_id): CallerIdentity,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> WebResult<Response> {
    let submission = parse_entry_body(&body)?.and_then(|req| req.submission_data);

    let entry = services::enter_competition(db.pool(), id, user_id, submission.as_ref()).await?;

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

/// An empty body means no submission data; anything else must be a valid request
fn parse_entry_body(body: &[u8]) -> WebResult<Option<CreateEntryRequest>> {
    if body.trim_ascii().is_empty() {
        return Ok(None);
    }

    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| WebError::BadRequest(format!("Invalid entry body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_has_no_submission() {
        assert!(parse_entry_body(b"").unwrap().is_none());
        assert!(parse_entry_body(b"  \n").unwrap().is_none());
    }

    #[test]
    fn test_body_with_submission_data() {
        let req = parse_entry_body(br#"{"submission_data":{"link":"https://example.com"}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            req.submission_data.unwrap()["link"],
            "https://example.com"
        );
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        let error = parse_entry_body(b"{not json").unwrap_err();
        assert!(matches!(error, WebError::BadRequest(_)));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }
}
