use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{CreateJobPayload, JobListQuery, JobPublicSummary, UpdateJobPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("department" = Option<String>, Query, description = "Filter by department"),
        ("work_type" = Option<String>, Query, description = "Filter by work type")
    ),
    responses(
        (status = 200, description = "Active job openings")
    )
)]
#[axum::debug_handler]
pub async fn list_public_jobs(
    State(state): State<AppState>,
    Query(mut query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    // Public browsing never sees inactive roles.
    query.active_only = Some(true);
    let jobs = state.job_service.list(query).await?;
    let summaries: Vec<JobPublicSummary> = jobs.into_iter().map(JobPublicSummary::from).collect();
    Ok(Json(summaries))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job role ID")
    ),
    responses(
        (status = 200, description = "Job detail"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_public_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    if !job.is_active {
        return Err(crate::error::Error::NotFound("Job not found".into()));
    }
    Ok(Json(JobPublicSummary::from(job)))
}

#[utoipa::path(
    post,
    path = "/api/hr/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job role created"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.create(payload).await?;

    // Index for semantic matching off the request path.
    let match_service = state.match_service.clone();
    let indexed = job.clone();
    tokio::spawn(async move {
        if let Err(e) = match_service.index_role(&indexed).await {
            tracing::warn!(job_id = %indexed.id, error = ?e, "Job embedding failed");
        }
    });

    Ok((StatusCode::CREATED, Json(job)))
}

#[utoipa::path(
    patch,
    path = "/api/hr/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job role ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job role updated"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.update(id, payload).await?;

    let match_service = state.match_service.clone();
    let indexed = job.clone();
    tokio::spawn(async move {
        if let Err(e) = match_service.index_role(&indexed).await {
            tracing::warn!(job_id = %indexed.id, error = ?e, "Job embedding failed");
        }
    });

    Ok(Json(job))
}

#[utoipa::path(
    get,
    path = "/api/hr/jobs",
    params(
        ("department" = Option<String>, Query, description = "Filter by department"),
        ("work_type" = Option<String>, Query, description = "Filter by work type"),
        ("active_only" = Option<bool>, Query, description = "Restrict to active roles")
    ),
    responses(
        (status = 200, description = "Job roles with screening criteria")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list(query).await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/hr/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job role ID")
    ),
    responses(
        (status = 200, description = "Job role with screening criteria"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    Ok(Json(job))
}

#[utoipa::path(
    delete,
    path = "/api/hr/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job role ID")
    ),
    responses(
        (status = 200, description = "Job role deactivated"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn deactivate_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.deactivate(id).await?;
    // Inactive roles must not come back as match candidates.
    state
        .vector_service
        .delete_by_source(crate::models::embedding::SourceType::JobRole, Some(job.id))
        .await?;
    Ok(Json(job))
}
