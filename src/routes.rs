// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{admin, assessment},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the student-facing and admin sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store and config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let assessment_routes = Router::new()
        .route("/", get(assessment::list_assessments))
        .route("/{id}", get(assessment::get_assessment))
        .route("/{id}/completeness", post(assessment::check_completeness))
        .route("/{id}/submissions", post(assessment::submit_assessment));

    let admin_routes = Router::new()
        .route("/assessments", post(admin::create_assessment))
        .route(
            "/assessments/{id}",
            get(admin::get_assessment).delete(admin::delete_assessment),
        );

    Router::new()
        .nest("/api/assessments", assessment_routes)
        .route("/api/submissions/{id}", get(assessment::get_submission))
        .route(
            "/api/students/{student_id}/submissions",
            get(assessment::list_student_submissions),
        )
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
