use std::fmt;

// Failure kinds of the login-then-fetch flow. Display text is what users see as status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    EmptyImageId,
    InvalidImageId(String),
    MissingCredentials,
    LoginRejected { status: u16 },
    MissingSessionCookie,
    Transport(String),
    UpstreamStatus { status: u16 },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::EmptyImageId => write!(f, "enter an image ID to load"),
            FetchError::InvalidImageId(raw) => {
                write!(f, "image ID {raw:?} must be a single identifier without '/', '?' or '#'")
            }
            FetchError::MissingCredentials => write!(
                f,
                "OMERO_PROXY_USER / OMERO_PROXY_PASS not set; cannot log in to OMERO"
            ),
            FetchError::LoginRejected { status } => {
                write!(f, "OMERO login failed with HTTP {status}")
            }
            FetchError::MissingSessionCookie => {
                write!(f, "OMERO login succeeded but no session cookie was returned")
            }
            FetchError::Transport(message) => write!(f, "could not reach OMERO: {message}"),
            FetchError::UpstreamStatus { status } => {
                write!(f, "OMERO returned HTTP {status}")
            }
        }
    }
}

impl std::error::Error for FetchError {}

// Errors reported by the OMERO gateway port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    Transport(String),
    Status(u16),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Transport(message) => write!(f, "gateway transport error: {message}"),
            GatewayError::Status(status) => write!(f, "gateway upstream status {status}"),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<GatewayError> for FetchError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(message) => FetchError::Transport(message),
            GatewayError::Status(status) => FetchError::UpstreamStatus { status },
        }
    }
}

// Errors reported by the metadata API port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    NotConfigured,
    InvalidBody(String),
    Transport(String),
    Upstream { status: u16 },
    Decode(String),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::NotConfigured => write!(f, "METADATA_API_URL is not set"),
            MetadataError::InvalidBody(message) => {
                write!(f, "request body is not valid JSON: {message}")
            }
            MetadataError::Transport(message) => {
                write!(f, "metadata transport error: {message}")
            }
            MetadataError::Upstream { status } => {
                write!(f, "metadata upstream error {status}")
            }
            MetadataError::Decode(message) => {
                write!(f, "metadata response decode error: {message}")
            }
        }
    }
}

impl std::error::Error for MetadataError {}
