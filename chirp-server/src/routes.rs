use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::api::{self, ApiError};
use crate::state::AppState;

/// Build the application router with all routes and layers
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(api::legacy::index))
        .route("/add", post(api::legacy::add))
        .route("/another", get(api::tweets::another))
        .route("/create", get(api::tweets::create))
        .route("/display", get(api::tweets::display))
        .route("/login", get(api::auth::login))
        .fallback(not_found)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> ApiError {
    ApiError::NotFound("No such route".to_string())
}
