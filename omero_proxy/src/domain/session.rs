use std::fmt;

use crate::domain::errors::FetchError;

// Image identifier supplied by the user: trimmed, non-empty, and a single path segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageId(String);

impl ImageId {
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FetchError::EmptyImageId);
        }

        // The id is spliced into webgateway paths sent with the service-account cookie,
        // so it must not be able to leave its segment. URL parsers treat `\` like `/`.
        let leaves_segment = trimmed.contains(['/', '\\', '?', '#']);
        if leaves_segment || trimmed == "." || trimmed == ".." {
            return Err(FetchError::InvalidImageId(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Service-account credentials used for the OMERO login POST.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    // Both halves must be present and non-empty, otherwise there is nothing to log in with.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self { username, password })
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// Login cookie carried by every request after a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionHandle {
    pub cookie_name: String,
    pub cookie_value: String,
}

impl SessionHandle {
    // Parse the leading `name=value` pair of a Set-Cookie header, ignoring attributes.
    pub fn from_set_cookie(header: &str) -> Option<Self> {
        let pair = header.split(';').next()?.trim();
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        let value = value.trim().trim_matches('"');
        if name.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self {
            cookie_name: name.to_string(),
            cookie_value: value.to_string(),
        })
    }

    // Value for the outgoing `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        format!("{}={}", self.cookie_name, self.cookie_value)
    }
}
