use std::sync::Arc;

use serde_json::{Value, json};

use crate::domain::{MetadataDocument, MetadataError, MetadataSource, metadata_url};

// A failed metadata call, carrying the endpoint it was aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFailure {
    pub url: String,
    pub error: MetadataError,
}

impl MetadataFailure {
    // Error object handed to the renderer in place of the metadata document.
    pub fn to_value(&self) -> Value {
        json!({
            "error": self.error.to_string(),
            "url": self.url,
        })
    }
}

// Metadata API lookups. Failures become values, never panics.
#[derive(Clone)]
pub struct MetadataUseCase {
    pub source: Arc<dyn MetadataSource>,
    // None when METADATA_API_URL is not configured.
    pub base_url: Option<String>,
}

impl MetadataUseCase {
    pub async fn get(
        &self,
        path: &str,
        query: Option<&str>,
    ) -> Result<MetadataDocument, MetadataFailure> {
        let url = self.endpoint(path, query)?;
        self.source
            .get(&url)
            .await
            .map_err(|error| failure(url, error))
    }

    pub async fn post_json(
        &self,
        path: &str,
        query: Option<&str>,
        body: &Value,
    ) -> Result<MetadataDocument, MetadataFailure> {
        let url = self.endpoint(path, query)?;
        self.source
            .post_json(&url, body)
            .await
            .map_err(|error| failure(url, error))
    }

    // A request body that never left the proxy, reported against the endpoint it targeted.
    pub fn rejected_body(
        &self,
        path: &str,
        query: Option<&str>,
        message: impl Into<String>,
    ) -> MetadataFailure {
        failure(
            self.target(path, query),
            MetadataError::InvalidBody(message.into()),
        )
    }

    fn endpoint(&self, path: &str, query: Option<&str>) -> Result<String, MetadataFailure> {
        match &self.base_url {
            Some(base) => Ok(metadata_url(base, path, query)),
            None => Err(failure(
                self.target(path, query),
                MetadataError::NotConfigured,
            )),
        }
    }

    // Without a base there is no absolute endpoint, so the relative target stands in.
    fn target(&self, path: &str, query: Option<&str>) -> String {
        match &self.base_url {
            Some(base) => metadata_url(base, path, query),
            None => {
                let path = path.trim_start_matches('/');
                match query.filter(|q| !q.is_empty()) {
                    Some(query) => format!("{path}?{query}"),
                    None => path.to_string(),
                }
            }
        }
    }
}

fn failure(url: String, error: MetadataError) -> MetadataFailure {
    tracing::warn!(%url, error = %error, "metadata request failed.");
    MetadataFailure { url, error }
}
