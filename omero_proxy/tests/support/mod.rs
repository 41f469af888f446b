// Fake OMERO + metadata upstream and proxy bootstrap shared by the integration tests.
#![allow(dead_code)]

use axum::{
    Form, Json, Router,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use omero_proxy::ProxyConfig;
use omero_proxy::domain::Credentials;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

pub const SESSION_COOKIE: &str = "sessionid=fake-session";

#[derive(Clone, Default)]
struct Upstream {
    logins: Arc<AtomicUsize>,
}

pub struct FakeUpstream {
    pub base_url: String,
    logins: Arc<AtomicUsize>,
}

impl FakeUpstream {
    pub fn login_count(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn metadata_url(&self) -> String {
        format!("{}/api", self.base_url)
    }
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
    server: String,
}

async fn login(State(upstream): State<Upstream>, Form(form): Form<LoginForm>) -> Response {
    upstream.logins.fetch_add(1, Ordering::SeqCst);
    if form.username == "svc" && form.password == "secret" && form.server == "1" {
        return (
            StatusCode::FOUND,
            [
                (header::LOCATION, "/webclient/".to_string()),
                (header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/; HttpOnly")),
            ],
        )
            .into_response();
    }
    // OMERO.web re-renders the login form without a session on bad credentials.
    (StatusCode::OK, "<form>login</form>").into_response()
}

fn render(headers: &HeaderMap, image_id: &str, prefix: &str) -> Response {
    let authorized = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == SESSION_COOKIE);
    if !authorized {
        return StatusCode::FORBIDDEN.into_response();
    }
    if image_id == "404" {
        return StatusCode::NOT_FOUND.into_response();
    }

    let mut body = vec![0xFF, 0xD8];
    body.extend_from_slice(format!("{prefix}-{image_id}").as_bytes());
    ([(header::CONTENT_TYPE, "image/jpeg")], body).into_response()
}

async fn thumbnail(headers: HeaderMap, Path(image_id): Path<String>) -> Response {
    render(&headers, &image_id, "thumb")
}

async fn full_image(headers: HeaderMap, Path(image_id): Path<String>) -> Response {
    render(&headers, &image_id, "full")
}

async fn image_metadata(Path(image_id): Path<String>) -> Json<Value> {
    Json(json!({ "id": image_id, "channels": ["DAPI", "FITC"] }))
}

// Echoes the query string so tests can see what reached the upstream.
async fn list_images(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({ "path": "/api/images", "query": query }))
}

pub const TIFF_BYTES: &[u8] = &[0x49, 0x49, 0x2A, 0x00, 0x08];

async fn attachment(Path(name): Path<String>) -> Response {
    if name == "notes.txt" {
        return ([(header::CONTENT_TYPE, "text/plain")], "plain notes").into_response();
    }
    ([(header::CONTENT_TYPE, "image/tiff")], TIFF_BYTES).into_response()
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn query(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "received": body }))
}

// Start the fake upstream on an ephemeral port inside the current test runtime.
pub async fn spawn_upstream() -> FakeUpstream {
    let upstream = Upstream::default();
    let app = Router::new()
        .route("/webclient/login/", post(login))
        .route("/webgateway/render_thumbnail/{image_id}/", get(thumbnail))
        .route("/webgateway/render_image/{image_id}/", get(full_image))
        .route("/api/images", get(list_images))
        .route("/api/images/{image_id}", get(image_metadata))
        .route("/api/files/{name}", get(attachment))
        .route("/api/broken", get(broken))
        .route("/api/query", post(query))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral upstream port");
    let addr = listener.local_addr().expect("get upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("upstream failed");
    });

    FakeUpstream {
        base_url: format!("http://{addr}"),
        logins: upstream.logins,
    }
}

pub fn proxy_config(
    omero_base: &str,
    metadata_api_url: Option<String>,
    credentials: Option<(&str, &str)>,
) -> ProxyConfig {
    ProxyConfig {
        omero_base: omero_base.to_string(),
        credentials: credentials.map(|(username, password)| Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }),
        session_cookie: "sessionid".to_string(),
        timeout: Duration::from_secs(2),
        accept_invalid_certs: false,
        metadata_api_url,
        port: 0,
        default_image_id: "11422".to_string(),
    }
}

// Start the proxy on an ephemeral port and return its base URL.
pub async fn spawn_proxy(config: ProxyConfig) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral proxy port");
    let addr = listener.local_addr().expect("get proxy addr");
    tokio::spawn(async move {
        omero_proxy::run(listener, config).await.expect("proxy failed");
    });
    format!("http://{addr}")
}

// Address with nothing listening, for transport failure tests.
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get addr");
    drop(listener);
    format!("http://{addr}")
}
