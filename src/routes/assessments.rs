use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{dto::assessment_dto::CreateAssessmentPayload, error::Result, AppState};

#[utoipa::path(
    post,
    path = "/api/hr/assessments",
    request_body = CreateAssessmentPayload,
    responses(
        (status = 201, description = "Assessment recorded, rankings refreshed"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn create_assessment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssessmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .get_by_id(payload.application_id)
        .await?;

    let assessment = state.assessment_service.create(payload).await?;
    state
        .application_service
        .set_behavioral_score(application.id, assessment.overall_score)
        .await?;
    state
        .application_service
        .recompute_rankings(application.job_role_id)
        .await?;

    Ok((StatusCode::CREATED, Json(assessment)))
}

#[utoipa::path(
    get,
    path = "/api/hr/applications/{id}/assessments",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Behavioral assessments, newest first")
    )
)]
#[axum::debug_handler]
pub async fn list_assessments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let assessments = state.assessment_service.list_for_application(id).await?;
    Ok(Json(assessments))
}
