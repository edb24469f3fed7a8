use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::candidate_dto::RegisterCandidatePayload,
    error::{Error, Result},
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/candidates/register",
    request_body = RegisterCandidatePayload,
    responses(
        (status = 201, description = "Candidate registered"),
        (status = 400, description = "Invalid payload or duplicate email")
    )
)]
#[axum::debug_handler]
pub async fn register_candidate(
    State(state): State<AppState>,
    Json(payload): Json<RegisterCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.candidate_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[utoipa::path(
    get,
    path = "/api/candidates/me",
    responses(
        (status = 200, description = "The authenticated candidate's profile"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let candidate_id = subject(&claims)?;
    let candidate = state.candidate_service.get_by_id(candidate_id).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    get,
    path = "/api/hr/candidates",
    responses(
        (status = 200, description = "All registered candidates")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let candidates = state.candidate_service.list().await?;
    Ok(Json(candidates))
}

#[utoipa::path(
    get,
    path = "/api/hr/candidates/talent-orbit",
    responses(
        (status = 200, description = "Rejected candidates retained for future roles")
    )
)]
#[axum::debug_handler]
pub async fn list_talent_orbit(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let candidates = state.candidate_service.list_talent_orbit().await?;
    Ok(Json(candidates))
}

#[utoipa::path(
    get,
    path = "/api/hr/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate profile"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.get_by_id(id).await?;
    Ok(Json(candidate))
}

/// Candidate id carried in the bearer token subject.
pub fn subject(claims: &Claims) -> Result<Uuid> {
    claims
        .subject_uuid()
        .ok_or_else(|| Error::Unauthorized("Token subject is not a valid id".into()))
}
