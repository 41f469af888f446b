use crate::interface_adapters::handlers::dashboard::{dashboard, healthz};
use crate::interface_adapters::handlers::images::{full_image, reset_session, status, thumbnail};
use crate::interface_adapters::handlers::metadata::{get_metadata, post_metadata};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    // Wire the HTTP routes to their handlers.
    Router::new()
        .route("/", get(dashboard))
        .route("/healthz", get(healthz))
        .route("/images/{image_id}/thumbnail", get(thumbnail))
        .route("/images/{image_id}/full", get(full_image))
        .route("/status", get(status))
        .route("/session/reset", post(reset_session))
        .route("/metadata/{*path}", get(get_metadata).post(post_metadata))
        .with_state(state)
}
