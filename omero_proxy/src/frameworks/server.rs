// Process startup: logging, upstream clients, shared state and the listener.

use crate::frameworks::config::ProxyConfig;
use crate::interface_adapters::clients::{MetadataClient, OmeroClient};
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, DashboardSettings};
use crate::use_cases::{ImageFetchUseCase, MetadataUseCase, SessionCell, StatusBoard};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Compact,
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().with_current_span(true).init(),
        LogFormat::Compact => builder.compact().init(),
    }

    // Panics inside handlers end up in the same log stream as everything else.
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "proxy panicked");
    }));
}

/// Serves the proxy routes on an already bound listener until it fails.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> io::Result<()> {
    let address = listener.local_addr()?;
    tracing::info!(%address, "omero proxy accepting connections");

    axum::serve(listener, routes::app(state))
        .await
        .inspect_err(|e| tracing::error!(%address, error = %e, "omero proxy stopped"))
}

/// Builds the upstream clients from `config` and serves on `listener`.
pub async fn run(listener: TcpListener, config: ProxyConfig) -> io::Result<()> {
    let state = build_state(&config)?;
    serve(listener, state).await
}

/// Binary entry point: reads `.env` and the config, then listens on localhost.
pub async fn start() -> io::Result<()> {
    // A missing .env is the normal case outside local development.
    let _ = dotenvy::dotenv();
    init_tracing(LogFormat::from_env_value(
        std::env::var("LOG_FORMAT").ok().as_deref(),
    ));

    let config = ProxyConfig::load()
        .inspect_err(|e| tracing::error!(error = %e, "configuration rejected"))
        .map_err(io::Error::other)?;

    let address = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(address)
        .await
        .inspect_err(|e| tracing::error!(%address, error = %e, "could not bind proxy port"))?;

    run(listener, config).await
}

pub fn build_state(config: &ProxyConfig) -> io::Result<Arc<AppState>> {
    if config.credentials.is_none() {
        tracing::warn!("OMERO_PROXY_USER / OMERO_PROXY_PASS not set; image fetches will fail.");
    }
    if config.accept_invalid_certs {
        tracing::warn!("TLS certificate verification is disabled for OMERO.");
    }

    let omero = OmeroClient::new(
        config.omero_base.clone(),
        config.timeout,
        config.accept_invalid_certs,
    )
    .map_err(|e| io::Error::other(format!("OMERO client: {e}")))?;
    let metadata = MetadataClient::new(config.timeout)
        .map_err(|e| io::Error::other(format!("metadata client: {e}")))?;

    tracing::debug!(
        omero_base = %config.omero_base,
        metadata_api_url = ?config.metadata_api_url,
        timeout_ms = config.timeout.as_millis(),
        "upstream clients configured"
    );

    Ok(Arc::new(AppState {
        images: ImageFetchUseCase {
            gateway: Arc::new(omero),
            credentials: config.credentials.clone(),
            session: SessionCell::new(),
            status: StatusBoard::default(),
            omero_base: config.omero_base.clone(),
            session_cookie: config.session_cookie.clone(),
        },
        metadata: MetadataUseCase {
            source: Arc::new(metadata),
            base_url: config.metadata_api_url.clone(),
        },
        dashboard: DashboardSettings {
            omero_base: config.omero_base.clone(),
            default_image_id: config.default_image_id.clone(),
        },
    }))
}
