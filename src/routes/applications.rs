use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{
        ApplicationListQuery, ApplyPayload, ShortlistTopPayload, StatusUpdatePayload,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    models::cv::Cv,
    routes::candidates::subject,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application submitted with eligibility snapshot"),
        (status = 400, description = "Inactive role or duplicate application"),
        (status = 404, description = "Job or CV not found")
    )
)]
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ApplyPayload>,
) -> Result<impl IntoResponse> {
    let candidate_id = subject(&claims)?;
    state.candidate_service.get_by_id(candidate_id).await?;
    let job = state.job_service.get_by_id(payload.job_role_id).await?;

    let cv: Option<Cv> = match payload.cv_id {
        Some(cv_id) => {
            let cv = state.cv_service.get_by_id(cv_id).await?;
            if cv.candidate_id != candidate_id {
                return Err(Error::NotFound("CV not found".into()));
            }
            Some(cv)
        }
        None => state.cv_service.get_primary(candidate_id).await?,
    };

    let application = state
        .application_service
        .apply(candidate_id, payload, &job, cv.as_ref())
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/api/applications/my",
    responses(
        (status = 200, description = "The authenticated candidate's applications")
    )
)]
#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let candidate_id = subject(&claims)?;
    let applications = state
        .application_service
        .list_for_candidate(candidate_id)
        .await?;
    Ok(Json(applications))
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/withdraw",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application withdrawn"),
        (status = 400, description = "Already rejected or withdrawn"),
        (status = 403, description = "Not the owner")
    )
)]
#[axum::debug_handler]
pub async fn withdraw(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate_id = subject(&claims)?;
    let application = state.application_service.withdraw(id, candidate_id).await?;
    Ok(Json(application))
}

#[utoipa::path(
    get,
    path = "/api/hr/applications",
    params(
        ("job_role_id" = Option<Uuid>, Query, description = "Filter by role"),
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "Applications with scores and eligibility")
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let applications = state
        .application_service
        .list(query.job_role_id, query.status)
        .await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/api/hr/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application detail"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get_by_id(id).await?;
    Ok(Json(application))
}

#[utoipa::path(
    post,
    path = "/api/hr/applications/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = StatusUpdatePayload,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Transition not allowed"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdatePayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .update_status(id, &payload.status)
        .await?;
    Ok(Json(application))
}

#[utoipa::path(
    post,
    path = "/api/hr/applications/{id}/recheck-eligibility",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Eligibility snapshot refreshed"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn recheck_eligibility(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get_by_id(id).await?;
    let job = state.job_service.get_by_id(application.job_role_id).await?;
    let cv = match application.cv_id {
        Some(cv_id) => Some(state.cv_service.get_by_id(cv_id).await?),
        None => None,
    };

    let outcome = state.application_service.eligibility_for(cv.as_ref(), &job);
    let application = state
        .application_service
        .store_eligibility(id, &outcome)
        .await?;
    state
        .application_service
        .recompute_rankings(job.id)
        .await?;

    Ok(Json(application))
}

#[utoipa::path(
    post,
    path = "/api/hr/applications/{id}/score",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Technical score computed and rankings refreshed"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn score_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get_by_id(id).await?;
    let job = state.job_service.get_by_id(application.job_role_id).await?;
    let candidate = state
        .candidate_service
        .get_by_id(application.candidate_id)
        .await?;
    let cv = match application.cv_id {
        Some(cv_id) => Some(state.cv_service.get_by_id(cv_id).await?),
        None => None,
    };

    let parsed = cv.as_ref().and_then(|c| c.parsed());
    let config = crate::config::get_config();
    let technical = state
        .match_service
        .technical_score(
            parsed.as_ref(),
            candidate.years_of_experience.map(f64::from),
            &job,
            config.similarity_threshold,
        )
        .await?;

    state
        .application_service
        .set_technical_score(id, technical)
        .await?;
    state
        .application_service
        .recompute_rankings(job.id)
        .await?;

    let application = state.application_service.get_by_id(id).await?;
    Ok(Json(application))
}

#[utoipa::path(
    get,
    path = "/api/hr/applications/{id}/summary",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Narrative summary of the candidate-to-role fit"),
        (status = 400, description = "CV has no parsed data"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn summarize_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get_by_id(id).await?;
    let job = state.job_service.get_by_id(application.job_role_id).await?;
    let cv = match application.cv_id {
        Some(cv_id) => Some(state.cv_service.get_by_id(cv_id).await?),
        None => None,
    };
    let parsed = cv
        .as_ref()
        .and_then(|c| c.parsed())
        .ok_or_else(|| Error::BadRequest("Application has no parsed CV data".into()))?;

    let summary = state
        .extract_service
        .summarize_match(
            &parsed,
            &job.title,
            &job.description,
            application.combined_score.unwrap_or(0.0),
        )
        .await?;

    Ok(Json(serde_json::json!({
        "application_id": id,
        "summary": summary,
    })))
}

#[utoipa::path(
    get,
    path = "/api/hr/jobs/{id}/rankings",
    params(
        ("id" = Uuid, Path, description = "Job role ID")
    ),
    responses(
        (status = 200, description = "Ranked eligible applications, best first")
    )
)]
#[axum::debug_handler]
pub async fn role_rankings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.job_service.get_by_id(id).await?;
    let ranked = state.application_service.recompute_rankings(id).await?;
    Ok(Json(ranked))
}

#[utoipa::path(
    post,
    path = "/api/hr/jobs/{id}/shortlist-top",
    params(
        ("id" = Uuid, Path, description = "Job role ID")
    ),
    request_body = ShortlistTopPayload,
    responses(
        (status = 200, description = "Top-ranked applications shortlisted"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn shortlist_top(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ShortlistTopPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state.job_service.get_by_id(id).await?;
    let outcome = state
        .application_service
        .shortlist_top(id, payload.count, payload.reject_others)
        .await?;
    Ok(Json(outcome))
}
