pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::export::handlers::handle_export;
use crate::state::AppState;
use crate::workflow::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/profile/options",
            get(handlers::handle_profile_options),
        )
        // Session lifecycle
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/language",
            put(handlers::handle_set_language),
        )
        // Phase transitions
        .route("/api/v1/sessions/:id/begin", post(handlers::handle_begin))
        .route(
            "/api/v1/sessions/:id/profile",
            post(handlers::handle_submit_profile),
        )
        .route(
            "/api/v1/sessions/:id/generate",
            post(handlers::handle_generate),
        )
        .route(
            "/api/v1/sessions/:id/answers",
            put(handlers::handle_record_answers),
        )
        .route(
            "/api/v1/sessions/:id/continue",
            post(handlers::handle_continue),
        )
        .route("/api/v1/sessions/:id/back", post(handlers::handle_back))
        .route(
            "/api/v1/sessions/:id/scenario",
            post(handlers::handle_submit_scenario),
        )
        .route("/api/v1/sessions/:id/reset", post(handlers::handle_reset))
        // Report export
        .route("/api/v1/sessions/:id/export/:format", get(handle_export))
        .with_state(state)
}
