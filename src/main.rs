use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use talentflow_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/jobs", get(routes::jobs::list_public_jobs))
        .route("/api/jobs/:id", get(routes::jobs::get_public_job))
        .route("/api/faq", get(routes::faq::search_faq))
        .route(
            "/api/candidates/register",
            post(routes::candidates::register_candidate),
        )
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let candidate_api = Router::new()
        .route("/api/candidates/me", get(routes::candidates::get_me))
        .route(
            "/api/cvs",
            get(routes::cvs::list_my_cvs).post(routes::cvs::upload_cv),
        )
        .route("/api/cvs/:id", get(routes::cvs::get_my_cv))
        .route("/api/cvs/:id/primary", post(routes::cvs::set_primary_cv))
        .route("/api/cvs/:id/reparse", post(routes::cvs::reparse_cv))
        .route("/api/applications", post(routes::applications::apply))
        .route(
            "/api/applications/my",
            get(routes::applications::my_applications),
        )
        .route(
            "/api/applications/:id/withdraw",
            post(routes::applications::withdraw),
        )
        .route("/api/matches", get(routes::matching::my_matches))
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let hr_api = Router::new()
        .route(
            "/api/hr/jobs",
            get(routes::jobs::list_jobs).post(routes::jobs::create_job),
        )
        .route(
            "/api/hr/jobs/:id",
            get(routes::jobs::get_job)
                .patch(routes::jobs::update_job)
                .delete(routes::jobs::deactivate_job),
        )
        .route(
            "/api/hr/jobs/:id/rankings",
            get(routes::applications::role_rankings),
        )
        .route(
            "/api/hr/jobs/:id/shortlist-top",
            post(routes::applications::shortlist_top),
        )
        .route(
            "/api/hr/candidates",
            get(routes::candidates::list_candidates),
        )
        .route(
            "/api/hr/candidates/talent-orbit",
            get(routes::candidates::list_talent_orbit),
        )
        .route(
            "/api/hr/candidates/:id",
            get(routes::candidates::get_candidate),
        )
        .route(
            "/api/hr/applications",
            get(routes::applications::list_applications),
        )
        .route(
            "/api/hr/applications/:id",
            get(routes::applications::get_application),
        )
        .route(
            "/api/hr/applications/:id/status",
            post(routes::applications::update_status),
        )
        .route(
            "/api/hr/applications/:id/recheck-eligibility",
            post(routes::applications::recheck_eligibility),
        )
        .route(
            "/api/hr/applications/:id/score",
            post(routes::applications::score_application),
        )
        .route(
            "/api/hr/applications/:id/summary",
            get(routes::applications::summarize_application),
        )
        .route(
            "/api/hr/applications/:id/assessments",
            get(routes::assessments::list_assessments),
        )
        .route(
            "/api/hr/applications/:id/feedback",
            get(routes::feedback::list_feedback),
        )
        .route(
            "/api/hr/assessments",
            post(routes::assessments::create_assessment),
        )
        .route(
            "/api/hr/interviews",
            get(routes::interviews::list_interviews)
                .post(routes::interviews::schedule_interview),
        )
        .route(
            "/api/hr/interviews/:id",
            get(routes::interviews::get_interview),
        )
        .route(
            "/api/hr/interviews/:id/status",
            post(routes::interviews::update_interview_status),
        )
        .route("/api/hr/faq", post(routes::faq::create_faq))
        .route(
            "/api/hr/faq/:id",
            axum::routing::delete(routes::faq::delete_faq),
        )
        .route("/api/hr/feedback", post(routes::feedback::create_feedback))
        .route(
            "/api/hr/feedback/:id",
            axum::routing::patch(routes::feedback::update_feedback),
        )
        .layer(axum::middleware::from_fn(middleware::auth::require_hr))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.hr_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(public_api)
        .merge(candidate_api)
        .merge(hr_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(
            talentflow_backend::utils::files::MAX_CV_BYTES + 1024 * 1024,
        ));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
