use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    middleware::auth::Claims,
    routes::candidates::subject,
    utils::files::save_cv_file,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/cvs",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "CV stored, parsing started"),
        (status = 400, description = "Missing file, bad type or too large")
    )
)]
#[axum::debug_handler]
pub async fn upload_cv(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let candidate_id = subject(&claims)?;
    state.candidate_service.get_by_id(candidate_id).await?;

    let mut file: Option<(String, bytes::Bytes)> = None;
    let mut is_primary = false;
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let name = field
                    .file_name()
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| "cv.bin".to_string());
                let data = field.bytes().await?;
                file = Some((name, data));
            }
            "is_primary" => {
                is_primary = field.text().await?.trim().eq_ignore_ascii_case("true");
            }
            _ => {}
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| Error::BadRequest("Missing 'file' form field".into()))?;
    let file_path = save_cv_file(&file_name, &data).await?;

    let cv = state
        .cv_service
        .create(candidate_id, file_name, file_path, is_primary)
        .await?;

    spawn_parse(&state, cv.id);

    Ok((StatusCode::CREATED, Json(cv)))
}

#[utoipa::path(
    get,
    path = "/api/cvs",
    responses(
        (status = 200, description = "The authenticated candidate's CVs")
    )
)]
#[axum::debug_handler]
pub async fn list_my_cvs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let candidate_id = subject(&claims)?;
    let cvs = state.cv_service.list_for_candidate(candidate_id).await?;
    Ok(Json(cvs))
}

#[utoipa::path(
    get,
    path = "/api/cvs/{id}",
    params(
        ("id" = Uuid, Path, description = "CV ID")
    ),
    responses(
        (status = 200, description = "CV with parsing status and extracted data"),
        (status = 404, description = "CV not found or not owned")
    )
)]
#[axum::debug_handler]
pub async fn get_my_cv(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate_id = subject(&claims)?;
    let cv = state.cv_service.get_by_id(id).await?;
    if cv.candidate_id != candidate_id {
        return Err(Error::NotFound("CV not found".into()));
    }
    Ok(Json(cv))
}

#[utoipa::path(
    post,
    path = "/api/cvs/{id}/primary",
    params(
        ("id" = Uuid, Path, description = "CV ID")
    ),
    responses(
        (status = 200, description = "CV marked as primary"),
        (status = 404, description = "CV not found or not owned")
    )
)]
#[axum::debug_handler]
pub async fn set_primary_cv(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate_id = subject(&claims)?;
    let cv = state.cv_service.set_primary(candidate_id, id).await?;
    Ok(Json(cv))
}

#[utoipa::path(
    post,
    path = "/api/cvs/{id}/reparse",
    params(
        ("id" = Uuid, Path, description = "CV ID")
    ),
    responses(
        (status = 202, description = "Parse retry started"),
        (status = 404, description = "CV not found or not owned")
    )
)]
#[axum::debug_handler]
pub async fn reparse_cv(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate_id = subject(&claims)?;
    let cv = state.cv_service.get_by_id(id).await?;
    if cv.candidate_id != candidate_id {
        return Err(Error::NotFound("CV not found".into()));
    }

    spawn_parse(&state, cv.id);

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "cv_id": cv.id, "parsing_status": "pending" })),
    ))
}

/// Parsing runs detached; upload and retry respond immediately.
fn spawn_parse(state: &AppState, cv_id: Uuid) {
    let cvs = state.cv_service.clone();
    let extract = state.extract_service.clone();
    let embed = state.embed_service.clone();
    let vectors = state.vector_service.clone();
    tokio::spawn(async move {
        cvs.run_parse_pipeline(cv_id, &extract, &embed, &vectors)
            .await;
    });
}
