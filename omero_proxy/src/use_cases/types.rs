use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::SessionHandle;

// Owned slot for the OMERO session handle, shared by every request that fetches images.
#[derive(Clone, Default)]
pub struct SessionCell {
    inner: Arc<Mutex<Option<SessionHandle>>>,
}

impl SessionCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handle(handle: SessionHandle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(handle))),
        }
    }

    pub async fn current(&self) -> Option<SessionHandle> {
        self.inner.lock().await.clone()
    }

    // Drop the stored handle; returns whether one was present.
    pub async fn clear(&self) -> bool {
        self.inner.lock().await.take().is_some()
    }

    pub(crate) fn slot(&self) -> &Mutex<Option<SessionHandle>> {
        &self.inner
    }
}

// Latest user-visible status message, overwritten by each fetch.
#[derive(Clone)]
pub struct StatusBoard {
    message: Arc<Mutex<String>>,
}

impl StatusBoard {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            message: Arc::new(Mutex::new(initial.into())),
        }
    }

    pub async fn set(&self, message: impl Into<String>) {
        *self.message.lock().await = message.into();
    }

    pub async fn get(&self) -> String {
        self.message.lock().await.clone()
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new("idle")
    }
}
