use crate::domain::{MetadataDocument, MetadataError, MetadataSource};
use async_trait::async_trait;
use reqwest::{Client, Response, header::CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

// Thin reqwest client for the companion metadata API.
#[derive(Clone)]
pub struct MetadataClient {
    http: Client,
}

impl MetadataClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

// JSON bodies are parsed; anything else is passed through with its declared type.
async fn decode(res: Response) -> Result<MetadataDocument, MetadataError> {
    let status = res.status();
    if !status.is_success() {
        return Err(MetadataError::Upstream {
            status: status.as_u16(),
        });
    }

    let content_type = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    if MetadataDocument::is_json_content_type(&content_type) {
        return res
            .json::<Value>()
            .await
            .map(MetadataDocument::Json)
            .map_err(|err| MetadataError::Decode(err.to_string()));
    }

    let bytes = res
        .bytes()
        .await
        .map_err(|err| MetadataError::Transport(err.to_string()))?;
    Ok(MetadataDocument::Raw {
        content_type,
        bytes: bytes.to_vec(),
    })
}

#[async_trait]
impl MetadataSource for MetadataClient {
    async fn get(&self, url: &str) -> Result<MetadataDocument, MetadataError> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| MetadataError::Transport(err.to_string()))?;
        decode(res).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<MetadataDocument, MetadataError> {
        let res = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| MetadataError::Transport(err.to_string()))?;
        decode(res).await
    }
}
