use crate::domain::{Credentials, GatewayError, LoginReply, OmeroGateway, SessionHandle, login_url};
use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, redirect};
use std::time::Duration;

// Thin wrapper around reqwest for OMERO.web calls.
#[derive(Clone)]
pub struct OmeroClient {
    http: Client,
    pub base_url: String,
}

impl OmeroClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, reqwest::Error> {
        // Redirects stay visible so the login's 302 and its Set-Cookie reach the use case.
        let http = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl OmeroGateway for OmeroClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, GatewayError> {
        let url = login_url(&self.base_url);
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("server", "1"),
        ];
        let res = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        let set_cookies = res
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect();

        Ok(LoginReply {
            status: res.status().as_u16(),
            set_cookies,
        })
    }

    async fn get_bytes(
        &self,
        url: &str,
        session: &SessionHandle,
    ) -> Result<Vec<u8>, GatewayError> {
        let res = self
            .http
            .get(url)
            .header(COOKIE, session.cookie_header())
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        let status = res.status();

        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}
