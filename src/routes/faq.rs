use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::faq_dto::{CreateFaqPayload, FaqSearchQuery},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/hr/faq",
    request_body = CreateFaqPayload,
    responses(
        (status = 201, description = "FAQ entry stored and indexed"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_faq(
    State(state): State<AppState>,
    Json(payload): Json<CreateFaqPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let id = state.faq_service.add_entry(payload).await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

#[utoipa::path(
    delete,
    path = "/api/hr/faq/{id}",
    params(
        ("id" = Uuid, Path, description = "FAQ entry ID")
    ),
    responses(
        (status = 204, description = "FAQ entry removed"),
        (status = 404, description = "FAQ entry not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.faq_service.remove_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/faq",
    params(
        ("q" = String, Query, description = "Free-text question"),
        ("limit" = Option<i64>, Query, description = "Maximum entries to return")
    ),
    responses(
        (status = 200, description = "Closest FAQ entries, best match first"),
        (status = 400, description = "Missing query")
    )
)]
#[axum::debug_handler]
pub async fn search_faq(
    State(state): State<AppState>,
    Query(query): Query<FaqSearchQuery>,
) -> Result<impl IntoResponse> {
    if query.q.trim().is_empty() {
        return Err(crate::error::Error::BadRequest(
            "Query parameter 'q' must not be empty".into(),
        ));
    }
    let config = crate::config::get_config();
    let entries = state
        .faq_service
        .search(
            &query.q,
            config.similarity_threshold,
            query.limit.unwrap_or(5),
        )
        .await?;
    Ok(Json(entries))
}
