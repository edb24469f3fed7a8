use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::feedback_dto::{CreateFeedbackPayload, UpdateFeedbackPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/hr/feedback",
    request_body = CreateFeedbackPayload,
    responses(
        (status = 201, description = "Feedback recorded"),
        (status = 400, description = "Invalid payload or recommendation"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn create_feedback(
    State(state): State<AppState>,
    Json(payload): Json<CreateFeedbackPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state
        .application_service
        .get_by_id(payload.application_id)
        .await?;
    let feedback = state.feedback_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

#[utoipa::path(
    patch,
    path = "/api/hr/feedback/{id}",
    params(
        ("id" = Uuid, Path, description = "Feedback ID")
    ),
    request_body = UpdateFeedbackPayload,
    responses(
        (status = 200, description = "Feedback updated"),
        (status = 404, description = "Feedback not found")
    )
)]
#[axum::debug_handler]
pub async fn update_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFeedbackPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let feedback = state.feedback_service.update(id, payload).await?;
    Ok(Json(feedback))
}

#[utoipa::path(
    get,
    path = "/api/hr/applications/{id}/feedback",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Reviewer feedback, newest first")
    )
)]
#[axum::debug_handler]
pub async fn list_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let feedback = state.feedback_service.list_for_application(id).await?;
    Ok(Json(feedback))
}
