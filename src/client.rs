use crate::api::{ArtistsResponse, PagingObject, SearchAlbumsResponse, TrackObject, TracksResponse};
use crate::auth::AccessToken;
use crate::cursor::PageCursor;
use crate::r#trait::CatalogClient;
use crate::retry::RetryConfig;
use crate::types::{AlbumPage, ArtistMeta, TrackPage, TrackPop};
use crate::{HarvestError, Result};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default base URL for the Spotify Web API.
pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";

/// Maximum number of ids per batch metadata request, per the API docs.
pub const MAX_BATCH_SIZE: usize = 50;

/// Rate-limited client for the Spotify Web API.
///
/// Wraps any [`HttpClient`] implementation with bearer-token auth and a
/// bounded retry loop: 429 responses sleep the server-supplied `Retry-After`
/// hint, 5xx responses sleep an increasing backoff, anything else non-2xx is
/// terminal immediately. One request is in flight at a time; the only
/// suspension points are the network round trips and the retry sleeps.
///
/// # Examples
///
/// ```rust,no_run
/// use spotify_harvest::{request_access_token, Credentials, SpotifyClient};
///
/// #[tokio::main]
/// async fn main() -> spotify_harvest::Result<()> {
///     let creds = Credentials::from_env()?;
///     let http = http_client::native::NativeClient::new();
///     let token = request_access_token(&http, &creds).await?;
///     let client = SpotifyClient::new(Box::new(http_client::native::NativeClient::new()), token);
///     Ok(())
/// }
/// ```
pub struct SpotifyClient {
    http: Box<dyn HttpClient>,
    token: AccessToken,
    api_base: String,
    retry: RetryConfig,
}

impl SpotifyClient {
    /// Create a client against the default API base URL.
    pub fn new(http: Box<dyn HttpClient>, token: AccessToken) -> Self {
        Self::with_api_base(http, token, DEFAULT_API_BASE.to_string())
    }

    /// Create a client against a custom API base URL. Useful for tests.
    pub fn with_api_base(http: Box<dyn HttpClient>, token: AccessToken, api_base: String) -> Self {
        Self {
            http,
            token,
            api_base,
            retry: RetryConfig::default(),
        }
    }

    /// Replace the retry configuration.
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Issue one GET request, classifying the response by status.
    ///
    /// 429 and 5xx become retryable errors for the loop in
    /// [`get_with_retry`](Self::get_with_retry); any other non-2xx surfaces
    /// the status and body as a terminal [`HarvestError::Api`].
    async fn get_once(&self, url: &str) -> Result<String> {
        let parsed = url
            .parse::<Url>()
            .map_err(|e| HarvestError::Http(format!("invalid URL '{url}': {e}")))?;
        let mut request = Request::new(Method::Get, parsed);
        request.insert_header("Authorization", format!("Bearer {}", self.token.secret()));

        let mut response = self
            .http
            .send(request)
            .await
            .map_err(|e| HarvestError::Http(e.to_string()))?;

        let status = u16::from(response.status());
        if status == 429 {
            let retry_after = response
                .header("Retry-After")
                .and_then(|values| values.last().as_str().parse().ok())
                .unwrap_or(self.retry.rate_limit_fallback);
            return Err(HarvestError::RateLimit { retry_after });
        }
        if (500..600).contains(&status) {
            return Err(HarvestError::Server { status });
        }
        if !(200..300).contains(&status) {
            let body = response.body_string().await.unwrap_or_default();
            return Err(HarvestError::Api { status, body });
        }

        response
            .body_string()
            .await
            .map_err(|e| HarvestError::Http(e.to_string()))
    }

    /// GET with bounded retries for transient failures.
    async fn get_with_retry(&self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(error) => match self.retry.backoff_delay(&error, attempt) {
                    Some(delay) => {
                        log::info!(
                            "Transient failure on attempt {} ({error}), retrying in {delay}s",
                            attempt + 1
                        );
                        tokio::time::sleep(Duration::from_secs(delay)).await;
                        attempt += 1;
                    }
                    None => return Err(error),
                },
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get_with_retry(url).await?;
        serde_json::from_str(&body).map_err(|e| HarvestError::Parse(e.to_string()))
    }

    fn batch_url(&self, resource: &str, ids: &[String]) -> String {
        format!(
            "{}/{resource}?ids={}",
            self.api_base,
            urlencoding::encode(&ids.join(","))
        )
    }
}

#[async_trait(?Send)]
impl CatalogClient for SpotifyClient {
    fn album_search(&self, query: &str, market: &str, limit: u32) -> PageCursor {
        PageCursor::first(
            format!("{}/search", self.api_base),
            vec![
                ("q".to_string(), query.to_string()),
                ("type".to_string(), "album".to_string()),
                ("market".to_string(), market.to_string()),
                ("limit".to_string(), limit.to_string()),
                ("offset".to_string(), "0".to_string()),
            ],
        )
    }

    fn album_tracks(&self, album_id: &str, market: &str, limit: u32) -> PageCursor {
        PageCursor::first(
            format!("{}/albums/{album_id}/tracks", self.api_base),
            vec![
                ("limit".to_string(), limit.to_string()),
                ("market".to_string(), market.to_string()),
            ],
        )
    }

    async fn fetch_album_page(&self, cursor: &PageCursor) -> Result<AlbumPage> {
        let response: SearchAlbumsResponse = self.get_json(&cursor.request_url()).await?;
        Ok(response.into_page())
    }

    async fn fetch_track_page(&self, cursor: &PageCursor) -> Result<TrackPage> {
        let response: PagingObject<TrackObject> = self.get_json(&cursor.request_url()).await?;
        Ok(response.into_track_page())
    }

    async fn artists_batch(&self, ids: &[String]) -> Result<Vec<ArtistMeta>> {
        let url = self.batch_url("artists", ids);
        let response: ArtistsResponse = self.get_json(&url).await?;
        Ok(response
            .artists
            .into_iter()
            .flatten()
            .map(|artist| artist.into_meta())
            .collect())
    }

    async fn tracks_batch(&self, ids: &[String]) -> Result<Vec<TrackPop>> {
        let url = self.batch_url("tracks", ids);
        let response: TracksResponse = self.get_json(&url).await?;
        Ok(response
            .tracks
            .into_iter()
            .flatten()
            .map(|track| track.into_pop())
            .collect())
    }
}
