use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{
    Credentials, GatewayError, LoginReply, MetadataDocument, MetadataError, MetadataSource,
    OmeroGateway, SessionHandle,
};

pub(crate) const TEST_BASE: &str = "http://omero.test";

pub(crate) fn test_credentials() -> Credentials {
    Credentials {
        username: "svc".to_string(),
        password: "secret".to_string(),
    }
}

pub(crate) fn test_handle() -> SessionHandle {
    SessionHandle {
        cookie_name: "sessionid".to_string(),
        cookie_value: "cookie-1".to_string(),
    }
}

// Fake OMERO gateway that records every call it receives.
#[derive(Clone)]
pub(crate) struct RecordingGateway {
    login_reply: Result<LoginReply, GatewayError>,
    responses: Arc<Mutex<HashMap<String, Result<Vec<u8>, GatewayError>>>>,
    login_calls: Arc<Mutex<usize>>,
    gets: Arc<Mutex<Vec<(String, SessionHandle)>>>,
}

impl RecordingGateway {
    // Gateway whose login redirects with a `sessionid` cookie.
    pub(crate) fn new() -> Self {
        Self::with_login_reply(Ok(LoginReply {
            status: 302,
            set_cookies: vec!["sessionid=cookie-1; Path=/; HttpOnly".to_string()],
        }))
    }

    pub(crate) fn with_login_reply(login_reply: Result<LoginReply, GatewayError>) -> Self {
        Self {
            login_reply,
            responses: Arc::new(Mutex::new(HashMap::new())),
            login_calls: Arc::new(Mutex::new(0)),
            gets: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn respond(&self, url: impl Into<String>, response: Result<Vec<u8>, GatewayError>) {
        let mut guard = self.responses.lock().expect("responses mutex poisoned");
        guard.insert(url.into(), response);
    }

    pub(crate) fn login_calls(&self) -> usize {
        *self.login_calls.lock().expect("login mutex poisoned")
    }

    pub(crate) fn gets(&self) -> Vec<(String, SessionHandle)> {
        self.gets.lock().expect("gets mutex poisoned").clone()
    }
}

#[async_trait]
impl OmeroGateway for RecordingGateway {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginReply, GatewayError> {
        *self.login_calls.lock().expect("login mutex poisoned") += 1;
        self.login_reply.clone()
    }

    async fn get_bytes(
        &self,
        url: &str,
        session: &SessionHandle,
    ) -> Result<Vec<u8>, GatewayError> {
        self.gets
            .lock()
            .expect("gets mutex poisoned")
            .push((url.to_string(), session.clone()));

        let guard = self.responses.lock().expect("responses mutex poisoned");
        guard
            .get(url)
            .cloned()
            .unwrap_or(Err(GatewayError::Status(404)))
    }
}

// Fake metadata API keyed by full endpoint URL.
#[derive(Clone, Default)]
pub(crate) struct RecordingMetadata {
    responses: Arc<Mutex<HashMap<String, Result<MetadataDocument, MetadataError>>>>,
    posted: Arc<Mutex<Vec<(String, Value)>>>,
}

impl RecordingMetadata {
    pub(crate) fn respond(
        &self,
        url: impl Into<String>,
        response: Result<MetadataDocument, MetadataError>,
    ) {
        let mut guard = self.responses.lock().expect("responses mutex poisoned");
        guard.insert(url.into(), response);
    }

    pub(crate) fn posted(&self) -> Vec<(String, Value)> {
        self.posted.lock().expect("posted mutex poisoned").clone()
    }

    fn lookup(&self, url: &str) -> Result<MetadataDocument, MetadataError> {
        let guard = self.responses.lock().expect("responses mutex poisoned");
        guard
            .get(url)
            .cloned()
            .unwrap_or(Err(MetadataError::Upstream { status: 404 }))
    }
}

#[async_trait]
impl MetadataSource for RecordingMetadata {
    async fn get(&self, url: &str) -> Result<MetadataDocument, MetadataError> {
        self.lookup(url)
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<MetadataDocument, MetadataError> {
        self.posted
            .lock()
            .expect("posted mutex poisoned")
            .push((url.to_string(), body.clone()));
        self.lookup(url)
    }
}
