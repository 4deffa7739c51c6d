use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        competition::{ArchiveRequest, CreateCompetitionRequest, UpdateCompetitionRequest},
        filter::CompetitionQuery,
    },
    models::Competition,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{WebError, WebResult};

use super::services;

#[utoipa::path(
    get,
    path = "/api/competitions",
    params(CompetitionQuery),
    responses(
        (status = 200, description = "Competitions matching the filter selection", body = Vec<Competition>),
        (status = 400, description = "Invalid filter value")
    ),
    tag = "competitions"
)]
pub async fn list_competitions(
    State(db): State<Database>,
    query: Result<Query<CompetitionQuery>, QueryRejection>,
) -> WebResult<Json<Vec<Competition>>> {
    let Query(query) = query.map_err(|e| WebError::BadRequest(e.body_text()))?;

    let competitions = services::list_competitions(db.pool(), &query).await?;
    tracing::debug!(count = competitions.len(), ?query, "Filtered competitions");

    Ok(Json(competitions))
}

#[utoipa::path(
    get,
    path = "/api/competitions/{id}",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    responses(
        (status = 200, description = "Competition found", body = Competition),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> WebResult<Json<Competition>> {
    let competition = services::get_competition(db.pool(), id).await?;

    Ok(Json(competition))
}

#[utoipa::path(
    post,
    path = "/api/competitions",
    request_body = CreateCompetitionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Competition created successfully", body = Competition),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn create_competition(
    State(db): State<Database>,
    Json(req): Json<CreateCompetitionRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let competition = services::create_competition(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(competition)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/competitions/{id}",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    request_body = UpdateCompetitionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Competition updated successfully", body = Competition),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found")
    ),
    tag = "admin"
)]
pub async fn update_competition(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateCompetitionRequest>,
) -> WebResult<Json<Competition>> {
    update_req.validate()?;

    let updated = services::update_competition(db.pool(), id, &update_req).await?;

    Ok(Json(updated))
}

#[utoipa::path(
    put,
    path = "/api/competitions/{id}/archive",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    request_body = ArchiveRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Archive flag changed", body = Competition),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found")
    ),
    tag = "admin"
)]
pub async fn archive_competition(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<ArchiveRequest>,
) -> WebResult<Json<Competition>> {
    let competition = services::set_archived(db.pool(), id, req.archived).await?;

    Ok(Json(competition))
}

#[utoipa::path(
    delete,
    path = "/api/competitions/{id}",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Competition deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found")
    ),
    tag = "admin"
)]
pub async fn delete_competition(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    services::delete_competition(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
