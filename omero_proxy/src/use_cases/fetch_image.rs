use std::sync::Arc;

use crate::domain::{
    Credentials, FetchError, ImageId, ImageKind, OmeroGateway, SessionHandle,
};
use crate::use_cases::types::{SessionCell, StatusBoard};

// Login-then-fetch against OMERO with injected dependencies.
// There is no retry and no session expiry handling: a stale handle stays until reset.
#[derive(Clone)]
pub struct ImageFetchUseCase {
    pub gateway: Arc<dyn OmeroGateway>,
    pub credentials: Option<Credentials>,
    pub session: SessionCell,
    pub status: StatusBoard,
    pub omero_base: String,
    // Name of the cookie the login response must set.
    pub session_cookie: String,
}

impl ImageFetchUseCase {
    pub async fn fetch_thumbnail(&self, raw_id: &str) -> Result<Vec<u8>, FetchError> {
        self.fetch_image(ImageKind::Thumbnail, raw_id).await
    }

    pub async fn fetch_full_image(&self, raw_id: &str) -> Result<Vec<u8>, FetchError> {
        self.fetch_image(ImageKind::Full, raw_id).await
    }

    pub async fn fetch_image(&self, kind: ImageKind, raw_id: &str) -> Result<Vec<u8>, FetchError> {
        let image_id = match ImageId::parse(raw_id) {
            Ok(image_id) => image_id,
            Err(err) => {
                tracing::warn!(raw_id, error = %err, "image id rejected; nothing fetched.");
                self.status.set(err.to_string()).await;
                return Err(err);
            }
        };

        let url = kind.url(&self.omero_base, image_id.as_str());
        self.fetch(&url).await
    }

    // Fetch any OMERO URL with the stored session, logging in first if needed.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let result = match self.ensure_session().await {
            Ok(handle) => self
                .gateway
                .get_bytes(url, &handle)
                .await
                .map_err(FetchError::from),
            Err(err) => Err(err),
        };

        match &result {
            Ok(bytes) => {
                tracing::info!(%url, bytes = bytes.len(), "fetched from OMERO.");
                self.status
                    .set(format!("Loaded {} bytes from {url}", bytes.len()))
                    .await;
            }
            Err(err) => {
                tracing::warn!(%url, error = %err, "OMERO fetch failed.");
                self.status.set(err.to_string()).await;
            }
        }

        result
    }

    // Drop the stored handle so the next fetch logs in again.
    pub async fn reset_session(&self) -> bool {
        let cleared = self.session.clear().await;
        tracing::info!(cleared, "OMERO session reset.");
        self.status.set("OMERO session cleared").await;
        cleared
    }

    // The slot stays locked across the login so concurrent requests log in once.
    async fn ensure_session(&self) -> Result<SessionHandle, FetchError> {
        let mut slot = self.session.slot().lock().await;
        if let Some(handle) = slot.as_ref() {
            return Ok(handle.clone());
        }

        let credentials = self
            .credentials
            .as_ref()
            .ok_or(FetchError::MissingCredentials)?;

        tracing::info!(username = %credentials.username, "logging in to OMERO.");
        let reply = self
            .gateway
            .login(credentials)
            .await
            .map_err(FetchError::from)?;

        // OMERO.web answers a good login with a redirect; anything else is a rejection.
        if !(200..400).contains(&reply.status) {
            return Err(FetchError::LoginRejected {
                status: reply.status,
            });
        }

        let handle = reply
            .session_cookie(&self.session_cookie)
            .ok_or(FetchError::MissingSessionCookie)?;

        tracing::info!(status = reply.status, "OMERO session established.");
        *slot = Some(handle.clone());
        Ok(handle)
    }
}
