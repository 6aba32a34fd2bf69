use thiserror::Error;

/// Error types for Spotify collection operations.
///
/// The taxonomy distinguishes transient failures (rate limiting and server
/// errors, which the client retries with bounded attempts) from terminal
/// failures (any other non-2xx response, or an exhausted retry budget).
/// Callers decide per call site whether a terminal error aborts the run or
/// skips the offending unit of work.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use spotify_harvest::{Credentials, HarvestError};
///
/// match Credentials::from_env() {
///     Ok(creds) => println!("Credentials loaded for {}", creds.client_id()),
///     Err(HarvestError::Auth(msg)) => eprintln!("Missing credentials: {msg}"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum HarvestError {
    /// HTTP/network related errors.
    ///
    /// Connection failures, timeouts, DNS errors, and other low-level
    /// networking issues. Not retried: the transport itself failed rather
    /// than the API pushing back.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication failures.
    ///
    /// Missing or rejected client credentials, or a token request the
    /// accounts endpoint refused. Fatal before any collection starts.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Rate limiting from the API (HTTP 429).
    ///
    /// The `retry_after` field carries the server-supplied wait hint in
    /// seconds (a fixed fallback is used when the header is absent). The
    /// client sleeps at least this long before the next attempt.
    #[error("Rate limited, retry after {retry_after} seconds")]
    RateLimit {
        /// Number of seconds to wait before retrying
        retry_after: u64,
    },

    /// Server-side failure (HTTP 5xx), assumed transient.
    ///
    /// Retried with an increasing backoff until the attempt budget is
    /// spent, at which point the last error surfaces as terminal.
    #[error("Server error: HTTP {status}")]
    Server {
        /// The 5xx status code returned
        status: u16,
    },

    /// Any other non-2xx response. Terminal immediately.
    #[error("API error: HTTP {status}: {body}")]
    Api {
        /// The status code returned
        status: u16,
        /// Response body, surfaced for diagnostics
        body: String,
    },

    /// Failed to parse an API response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// File system I/O errors while writing snapshots.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization errors while writing snapshots.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl HarvestError {
    /// Whether the retry loop may attempt this request again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            HarvestError::RateLimit { .. } | HarvestError::Server { .. }
        )
    }
}
