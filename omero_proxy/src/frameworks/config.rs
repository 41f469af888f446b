use crate::domain::Credentials;
use serde::Deserialize;
use std::{env, fmt, fs, time::Duration};
use url::Url;

// Runtime configuration. Sources, lowest priority first: defaults,
// the TOML file named by OMERO_PROXY_CONFIG, then environment variables.

pub const DEFAULT_OMERO_BASE: &str = "https://nife-dev.cancer.gov";
pub const DEFAULT_SESSION_COOKIE: &str = "sessionid";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_IMAGE_ID: &str = "11422";

#[derive(Clone, Debug)]
pub struct ProxyConfig {
    pub omero_base: String,
    pub credentials: Option<Credentials>,
    pub session_cookie: String,
    pub timeout: Duration,
    pub accept_invalid_certs: bool,
    pub metadata_api_url: Option<String>,
    pub port: u16,
    pub default_image_id: String,
}

// Shape of the optional TOML config file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub omero_base: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub session_cookie: Option<String>,
    pub timeout_ms: Option<u64>,
    pub accept_invalid_certs: Option<bool>,
    pub metadata_api_url: Option<String>,
    pub port: Option<u16>,
    pub default_image_id: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBaseUrl { key: &'static str, value: String },
    InvalidValue { key: &'static str, value: String },
    ReadFile { path: String, source: std::io::Error },
    ParseFile { path: String, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseUrl { key, value } => {
                write!(f, "{key} is not a valid absolute URL: {value:?}")
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key} has an invalid value: {value:?}")
            }
            ConfigError::ReadFile { path, source } => {
                write!(f, "failed to read config file {path}: {source}")
            }
            ConfigError::ParseFile { path, source } => {
                write!(f, "failed to parse config file {path}: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ProxyConfig {
    // Load from the process environment (and the config file it names).
    pub fn load() -> Result<Self, ConfigError> {
        let file = match env::var("OMERO_PROXY_CONFIG") {
            Ok(path) => read_file_config(&path)?,
            Err(_) => FileConfig::default(),
        };
        Self::from_sources(file, |key| env::var(key).ok())
    }

    pub fn from_sources(
        file: FileConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        // Blank environment values count as unset.
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let omero_base = var("OMERO_BASE")
            .or(file.omero_base)
            .unwrap_or_else(|| DEFAULT_OMERO_BASE.to_string());
        let omero_base = normalize_base("OMERO_BASE", &omero_base)?;

        let metadata_api_url = match var("METADATA_API_URL").or(file.metadata_api_url) {
            Some(value) => Some(normalize_base("METADATA_API_URL", &value)?),
            None => None,
        };

        let credentials = Credentials::from_parts(
            var("OMERO_PROXY_USER").or(file.username),
            var("OMERO_PROXY_PASS").or(file.password),
        );

        let timeout_ms: u64 = match var("OMERO_TIMEOUT_MS") {
            Some(value) => parse_value("OMERO_TIMEOUT_MS", &value)?,
            None => file
                .timeout_ms
                .unwrap_or(DEFAULT_TIMEOUT.as_millis() as u64),
        };
        // A zero timeout would fail every upstream call before it starts.
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "OMERO_TIMEOUT_MS",
                value: timeout_ms.to_string(),
            });
        }

        let accept_invalid_certs = match var("OMERO_ACCEPT_INVALID_CERTS") {
            Some(value) => parse_value("OMERO_ACCEPT_INVALID_CERTS", &value)?,
            None => file.accept_invalid_certs.unwrap_or(false),
        };

        let port = match var("PROXY_PORT") {
            Some(value) => parse_value("PROXY_PORT", &value)?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        Ok(Self {
            omero_base,
            credentials,
            session_cookie: var("OMERO_SESSION_COOKIE")
                .or(file.session_cookie)
                .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string()),
            timeout: Duration::from_millis(timeout_ms),
            accept_invalid_certs,
            metadata_api_url,
            port,
            default_image_id: var("DEFAULT_IMAGE_ID")
                .or(file.default_image_id)
                .unwrap_or_else(|| DEFAULT_IMAGE_ID.to_string()),
        })
    }
}

pub fn read_file_config(path: &str) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_string(),
        source,
    })?;
    parse_file_config(path, &raw)
}

fn parse_file_config(path: &str, raw: &str) -> Result<FileConfig, ConfigError> {
    toml::from_str(raw).map_err(|source| ConfigError::ParseFile {
        path: path.to_string(),
        source,
    })
}

// Trim whitespace and trailing slashes, then require an absolute URL.
fn normalize_base(key: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    match Url::parse(trimmed) {
        Ok(url) if url.has_host() => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidBaseUrl {
            key,
            value: raw.to_string(),
        }),
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}
