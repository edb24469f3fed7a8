use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::interview_dto::{
        InterviewListQuery, ScheduleInterviewPayload, UpdateInterviewStatusPayload,
    },
    error::{Error, Result},
    models::application::ApplicationStatus,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/hr/interviews",
    request_body = ScheduleInterviewPayload,
    responses(
        (status = 201, description = "Interview scheduled, application moved to interview_scheduled"),
        (status = 400, description = "Invalid payload or application not at the interview stage"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn schedule_interview(
    State(state): State<AppState>,
    Json(payload): Json<ScheduleInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let application = state
        .application_service
        .get_by_id(payload.application_id)
        .await?;
    let status = application
        .status()
        .ok_or_else(|| Error::Internal(format!("Corrupt status '{}'", application.status)))?;
    // Scheduling is what moves a shortlisted application forward; further
    // rounds can be added while it is already at the interview stage.
    if !matches!(
        status,
        ApplicationStatus::Shortlisted | ApplicationStatus::InterviewScheduled
    ) {
        return Err(Error::InvalidTransition {
            from: status.as_str().to_string(),
            to: ApplicationStatus::InterviewScheduled.as_str().to_string(),
        });
    }

    let interview = state.interview_service.schedule(payload).await?;
    if status == ApplicationStatus::Shortlisted {
        state
            .application_service
            .update_status(
                application.id,
                ApplicationStatus::InterviewScheduled.as_str(),
            )
            .await?;
    }

    Ok((StatusCode::CREATED, Json(interview)))
}

#[utoipa::path(
    get,
    path = "/api/hr/interviews",
    params(
        ("application_id" = Option<Uuid>, Query, description = "Filter by application"),
        ("status" = Option<String>, Query, description = "Filter by interview status")
    ),
    responses(
        (status = 200, description = "Interviews ordered by scheduled time")
    )
)]
#[axum::debug_handler]
pub async fn list_interviews(
    State(state): State<AppState>,
    Query(query): Query<InterviewListQuery>,
) -> Result<impl IntoResponse> {
    let interviews = state.interview_service.list(query).await?;
    Ok(Json(interviews))
}

#[utoipa::path(
    get,
    path = "/api/hr/interviews/{id}",
    params(
        ("id" = Uuid, Path, description = "Interview ID")
    ),
    responses(
        (status = 200, description = "Interview detail"),
        (status = 404, description = "Interview not found")
    )
)]
#[axum::debug_handler]
pub async fn get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let interview = state.interview_service.get_by_id(id).await?;
    Ok(Json(interview))
}

#[utoipa::path(
    post,
    path = "/api/hr/interviews/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Interview ID")
    ),
    request_body = UpdateInterviewStatusPayload,
    responses(
        (status = 200, description = "Interview status updated"),
        (status = 400, description = "Change not allowed from the current status"),
        (status = 404, description = "Interview not found")
    )
)]
#[axum::debug_handler]
pub async fn update_interview_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInterviewStatusPayload>,
) -> Result<impl IntoResponse> {
    let interview = state.interview_service.update_status(id, payload).await?;
    Ok(Json(interview))
}
