use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Bearer claims issued by the external identity service. `sub` is the
/// candidate or HR user id; `role` is "candidate" or "hr".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

impl Claims {
    pub fn is_hr(&self) -> bool {
        self.role.as_deref() == Some("hr")
    }

    pub fn subject_uuid(&self) -> Option<uuid::Uuid> {
        self.sub.parse().ok()
    }
}

fn unauthorized(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

fn decode_bearer(req: &Request) -> Result<Claims, Response> {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Err(unauthorized("missing_authorization"));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(unauthorized("bad_authorization"));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(unauthorized("unsupported_scheme"));
    };

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| unauthorized("invalid_token"))
}

pub async fn require_bearer_auth(mut req: Request, next: Next) -> Response {
    match decode_bearer(&req) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(resp) => resp,
    }
}

/// HR-only routes. Authorization failures are explicit and never silently
/// downgrade permissions.
pub async fn require_hr(mut req: Request, next: Next) -> Response {
    match decode_bearer(&req) {
        Ok(claims) if claims.is_hr() => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Ok(_) => (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "hr_role_required"})),
        )
            .into_response(),
        Err(resp) => resp,
    }
}
