use crate::domain::{MetadataDocument, MetadataError};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{MetadataFailure, render_json_pretty};
use axum::{
    Json,
    extract::{Path, RawQuery, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;

#[tracing::instrument(name = "metadata_get", skip_all, fields(path = %path, query = ?query))]
pub async fn get_metadata(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    document_response(state.metadata.get(&path, query.as_deref()).await)
}

#[tracing::instrument(name = "metadata_post", skip_all, fields(path = %path, query = ?query))]
pub async fn post_metadata(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = match body {
        Ok(Json(body)) => state.metadata.post_json(&path, query.as_deref(), &body).await,
        Err(rejection) => Err(state.metadata.rejected_body(
            &path,
            query.as_deref(),
            rejection.body_text(),
        )),
    };
    document_response(result)
}

// JSON is pretty-printed, other payloads keep their bytes and content type,
// and a failure carries the error object instead of the document.
fn document_response(result: Result<MetadataDocument, MetadataFailure>) -> Response {
    match result {
        Ok(MetadataDocument::Json(value)) => pretty_json(StatusCode::OK, &value),
        Ok(MetadataDocument::Raw {
            content_type,
            bytes,
        }) => {
            let content_type = HeaderValue::from_str(&content_type)
                .unwrap_or(HeaderValue::from_static("application/octet-stream"));
            ([(CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(failure) => {
            let status = match failure.error {
                MetadataError::InvalidBody(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };
            pretty_json(status, &failure.to_value())
        }
    }
}

fn pretty_json(status: StatusCode, value: &Value) -> Response {
    (
        status,
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        render_json_pretty(value),
    )
        .into_response()
}
