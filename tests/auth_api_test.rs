use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Json,
    routing::get,
    Extension, Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value as JsonValue};
use talentflow_backend::middleware;
use talentflow_backend::middleware::auth::Claims;
use tower::ServiceExt;
use uuid::Uuid;

fn token(sub: &str, role: Option<&str>, secret: &str) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        role: role.map(|r| r.to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode token")
}

async fn whoami(Extension(claims): Extension<Claims>) -> Json<JsonValue> {
    Json(json!({ "sub": claims.sub, "hr": claims.is_hr() }))
}

#[tokio::test]
async fn auth_and_rate_limit_end_to_end() {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "postgres://localhost/unused");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("LLM_API_KEY", "sk-test");
    env::set_var("HR_RPS", "100");
    env::set_var("PUBLIC_RPS", "100");

    talentflow_backend::config::init_config().expect("init config");

    let candidate_id = Uuid::new_v4();
    let candidate_token = token(&candidate_id.to_string(), Some("candidate"), "test_secret_key");
    let hr_token = token(&Uuid::new_v4().to_string(), Some("hr"), "test_secret_key");
    let wrong_secret_token = token(&candidate_id.to_string(), Some("hr"), "other_secret");

    let app = Router::new()
        .route("/health", get(talentflow_backend::routes::health::health))
        .route(
            "/candidate/me",
            get(whoami).layer(axum::middleware::from_fn(
                middleware::auth::require_bearer_auth,
            )),
        )
        .route(
            "/hr/me",
            get(whoami).layer(axum::middleware::from_fn(middleware::auth::require_hr)),
        );

    // Health is open.
    let resp = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // No token.
    let resp = app
        .clone()
        .oneshot(Request::get("/candidate/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Bad signature.
    let resp = app
        .clone()
        .oneshot(
            Request::get("/candidate/me")
                .header("Authorization", format!("Bearer {}", wrong_secret_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Valid candidate token.
    let resp = app
        .clone()
        .oneshot(
            Request::get("/candidate/me")
                .header("Authorization", format!("Bearer {}", candidate_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value: JsonValue = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["sub"], candidate_id.to_string());
    assert_eq!(value["hr"], false);

    // Candidate token on an HR route is forbidden, not unauthorized.
    let resp = app
        .clone()
        .oneshot(
            Request::get("/hr/me")
                .header("Authorization", format!("Bearer {}", candidate_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // HR token passes.
    let resp = app
        .clone()
        .oneshot(
            Request::get("/hr/me")
                .header("Authorization", format!("Bearer {}", hr_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Rate limiting: a 2 rps window admits two requests and rejects the third.
    let limited = Router::new()
        .route("/health", get(talentflow_backend::routes::health::health))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(2),
            middleware::rate_limit::rps_middleware,
        ));
    for _ in 0..2 {
        let resp = limited
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let resp = limited
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}
