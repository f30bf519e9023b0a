use axum::Router;
use axum::middleware::{from_fn, map_response_with_state};
use axum::routing::{get, post};
use neighborly_core::AppError;
use tower_http::trace::TraceLayer;

use crate::error::mask_internal_errors;
use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/ai/events",
            post(handlers::generation::suggest_event_handler),
        )
        .route(
            "/api/ai/feedback",
            post(handlers::generation::review_submission_handler),
        )
        .route_layer(from_fn(middleware::require_identity));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(map_response_with_state(
            app_state.clone(),
            mask_internal_errors,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
