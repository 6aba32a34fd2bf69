//! Client-credentials authentication.
//!
//! The collector authenticates once per run: client id and secret come from
//! the process environment, are exchanged for a short-lived bearer token at
//! startup, and the token is threaded through every call read-only. There is
//! no refresh logic; a run long enough to outlive the token fails on the
//! first 401 after expiry.

use crate::api::TokenResponse;
use crate::{HarvestError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use std::env;

/// Default token endpoint for the client-credentials flow.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// API client id and secret, consumed once at startup.
#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET` from the
    /// environment.
    ///
    /// Missing variables are a fatal startup error: collection never starts
    /// without credentials.
    pub fn from_env() -> Result<Self> {
        let client_id = env::var("SPOTIFY_CLIENT_ID").map_err(|_| {
            HarvestError::Auth("SPOTIFY_CLIENT_ID environment variable not set".to_string())
        })?;
        let client_secret = env::var("SPOTIFY_CLIENT_SECRET").map_err(|_| {
            HarvestError::Auth("SPOTIFY_CLIENT_SECRET environment variable not set".to_string())
        })?;
        Ok(Self::new(client_id, client_secret))
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The `Basic` authorization header value for the token request.
    fn basic_auth_header(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));
        format!("Basic {encoded}")
    }
}

/// Opaque bearer credential, fetched once per run and never mutated.
#[derive(Debug, Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value, for the `Authorization: Bearer` header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

/// Exchange client credentials for an access token at the default endpoint.
pub async fn request_access_token(
    http: &dyn HttpClient,
    credentials: &Credentials,
) -> Result<AccessToken> {
    request_access_token_at(http, DEFAULT_TOKEN_URL, credentials).await
}

/// Exchange client credentials for an access token at a custom endpoint.
/// Useful for tests.
pub async fn request_access_token_at(
    http: &dyn HttpClient,
    token_url: &str,
    credentials: &Credentials,
) -> Result<AccessToken> {
    let url = token_url
        .parse::<Url>()
        .map_err(|e| HarvestError::Http(format!("invalid token URL '{token_url}': {e}")))?;
    let mut request = Request::new(Method::Post, url);
    request.insert_header("Authorization", credentials.basic_auth_header());
    request.insert_header("Content-Type", "application/x-www-form-urlencoded");
    request.set_body("grant_type=client_credentials");

    let mut response = http
        .send(request)
        .await
        .map_err(|e| HarvestError::Http(e.to_string()))?;

    let status = u16::from(response.status());
    let body = response
        .body_string()
        .await
        .map_err(|e| HarvestError::Http(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(HarvestError::Auth(format!(
            "token request failed with HTTP {status}: {body}"
        )));
    }

    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|e| HarvestError::Parse(e.to_string()))?;
    Ok(AccessToken::new(token.access_token))
}
