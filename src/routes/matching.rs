use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    error::Result, middleware::auth::Claims, routes::candidates::subject, AppState,
};

#[utoipa::path(
    get,
    path = "/api/matches",
    responses(
        (status = 200, description = "Every active role scored against the candidate's primary CV"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn my_matches(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let candidate_id = subject(&claims)?;
    let candidate = state.candidate_service.get_by_id(candidate_id).await?;

    let cv = state.cv_service.get_primary(candidate_id).await?;
    let parsed = cv.as_ref().and_then(|c| c.parsed());

    let roles = state.job_service.list_active().await?;
    let config = crate::config::get_config();
    let matches = state
        .match_service
        .find_matching_roles(
            parsed.as_ref(),
            candidate.years_of_experience.map(f64::from),
            &roles,
            config.similarity_threshold,
        )
        .await?;

    Ok(Json(matches))
}
