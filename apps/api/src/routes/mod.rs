pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::analysis::handlers as analysis;
use crate::builder::handlers as builder;
use crate::catalog::handlers as catalog;
use crate::config::Config;
use crate::feedback::handlers as feedback;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Taxonomy
        .route("/job-categories", get(catalog::handle_job_categories))
        .route("/job-roles", get(catalog::handle_job_roles))
        .route("/job-skills", get(catalog::handle_job_skills))
        // Analysis + history
        .route("/analyze-resume", post(analysis::handle_analyze_resume))
        .route("/analyze-text", post(analysis::handle_analyze_text))
        .route("/user-analyses/:user_id", get(analysis::handle_user_analyses))
        .route("/store-analysis", post(analysis::handle_store_analysis))
        // Builder, feedback
        .route("/build-resume", post(builder::handle_build_resume))
        .route("/send-feedback", post(feedback::handle_send_feedback))
        // Job board
        .route("/api/jobs", get(jobs::handle_search_jobs))
        .route("/api/jobs/:job_id", get(jobs::handle_job_detail))
        .layer(body_limit)
        .layer(cors)
        .with_state(state)
}

/// Any origin without credentials, or an explicit list with credentials.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
