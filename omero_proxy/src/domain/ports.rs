use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::{GatewayError, MetadataError};
use crate::domain::session::{Credentials, SessionHandle};

// Raw outcome of a login POST. The use case decides what counts as success.
#[derive(Clone, Debug, Default)]
pub struct LoginReply {
    pub status: u16,
    // Every Set-Cookie header returned by the login response.
    pub set_cookies: Vec<String>,
}

impl LoginReply {
    pub fn session_cookie(&self, name: &str) -> Option<SessionHandle> {
        self.set_cookies
            .iter()
            .filter_map(|header| SessionHandle::from_set_cookie(header))
            .find(|handle| handle.cookie_name == name)
    }
}

// Use cases depend on these traits, not on the reqwest clients.
#[async_trait]
pub trait OmeroGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, GatewayError>;

    async fn get_bytes(&self, url: &str, session: &SessionHandle)
    -> Result<Vec<u8>, GatewayError>;
}

// Body returned by the metadata API: parsed JSON, or any other payload kept as bytes.
#[derive(Clone, Debug, PartialEq)]
pub enum MetadataDocument {
    Json(Value),
    Raw { content_type: String, bytes: Vec<u8> },
}

impl MetadataDocument {
    // JSON is recognised by media type, including `+json` suffixes.
    pub fn is_json_content_type(content_type: &str) -> bool {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence == "application/json" || essence.ends_with("+json")
    }
}

// The serialization within this port is a dependency leak, but a pragmatic one.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn get(&self, url: &str) -> Result<MetadataDocument, MetadataError>;

    async fn post_json(&self, url: &str, body: &Value) -> Result<MetadataDocument, MetadataError>;
}
