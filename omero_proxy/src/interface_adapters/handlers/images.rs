use crate::domain::FetchError;
use crate::interface_adapters::protocol::{SessionResetResponse, StatusResponse};
use crate::interface_adapters::state::AppState;
use crate::use_cases::render_image;
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

// Carries the status message on otherwise empty image responses.
pub const PROXY_STATUS_HEADER: &str = "x-proxy-status";

#[tracing::instrument(name = "thumbnail", skip_all, fields(image_id = %image_id))]
pub async fn thumbnail(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<String>,
) -> Response {
    image_response(state.images.fetch_thumbnail(&image_id).await)
}

#[tracing::instrument(name = "full_image", skip_all, fields(image_id = %image_id))]
pub async fn full_image(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<String>,
) -> Response {
    image_response(state.images.fetch_full_image(&image_id).await)
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: state.images.status.get().await,
    })
}

pub async fn reset_session(State(state): State<Arc<AppState>>) -> Json<SessionResetResponse> {
    let cleared = state.images.reset_session().await;
    Json(SessionResetResponse { cleared })
}

// A failed fetch renders as an empty image, never as a server error.
fn image_response(result: Result<Vec<u8>, FetchError>) -> Response {
    match result {
        Ok(bytes) => {
            let payload = render_image(bytes);
            (
                [(CONTENT_TYPE, HeaderValue::from_static(payload.format.mime_type()))],
                payload.bytes,
            )
                .into_response()
        }
        Err(err) => {
            let mut response = StatusCode::NO_CONTENT.into_response();
            if let Ok(value) = HeaderValue::from_str(&err.to_string()) {
                response.headers_mut().insert(PROXY_STATUS_HEADER, value);
            }
            response
        }
    }
}
