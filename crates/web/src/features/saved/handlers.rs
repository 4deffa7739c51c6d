use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{Database, models::SavedCompetition};
use uuid::Uuid;

use crate::error::WebResult;
use crate::middleware::identity::CallerIdentity;

use super::services;

#[utoipa::path(
    post,
    path = "/api/competitions/{id}/saves",
    params(
        ("id" = Uuid, Path, description = "Competition id"),
        ("x-user-id" = Uuid, Header, description = "Signed-in user")
    ),
    responses(
        (status = 201, description = "Competition saved", body = SavedCompetition),
        (status = 401, description = "No signed-in user"),
        (status = 404, description = "Competition not found")
    ),
    tag = "entries"
)]
pub async fn save_competition(
    State(db): State<Database>,
    CallerIdentity(user_id): CallerIdentity,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    let saved = services::save_competition(db.pool(), id, user_id).await?;

    Ok((StatusCode::CREATED, Json(saved)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/me/saved",
    params(
        ("x-user-id" = Uuid, Header, description = "Signed-in user")
    ),
    responses(
        (status = 200, description = "Bookmarks of the signed-in user", body = Vec<SavedCompetition>),
        (status = 401, description = "No signed-in user")
    ),
    tag = "entries"
)]
pub async fn list_saved(
    State(db): State<Database>,
    CallerIdentity(user_id): CallerIdentity,
) -> WebResult<Json<Vec<SavedCompetition>>> {
    let saved = services::list_saved(db.pool(), user_id).await?;

    Ok(Json(saved))
}
