use crate::HarvestError;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of request attempts, including the first one
    pub max_attempts: u32,
    /// Base delay for the 5xx backoff (in seconds); attempt `n` waits
    /// `base + n` seconds
    pub server_backoff_base: u64,
    /// Wait applied when a 429 carries no `Retry-After` header (in seconds)
    pub rate_limit_fallback: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            server_backoff_base: 1,
            rate_limit_fallback: 1,
        }
    }
}

impl RetryConfig {
    /// Decide whether a failed attempt may be retried.
    ///
    /// Returns the delay in seconds to sleep before the next attempt, or
    /// `None` when the error is terminal or the attempt budget is spent.
    /// `attempt` is 0-based: the first request is attempt 0, so with
    /// `max_attempts = 5` the last retryable failure is attempt 3 and the
    /// fifth request is final.
    ///
    /// Rate limits wait at least the server-supplied hint; server errors
    /// back off by `base + attempt` seconds.
    pub fn backoff_delay(&self, error: &HarvestError, attempt: u32) -> Option<u64> {
        if attempt + 1 >= self.max_attempts {
            return None;
        }
        match error {
            HarvestError::RateLimit { retry_after } => Some(*retry_after),
            HarvestError::Server { .. } => {
                Some(self.server_backoff_base + u64::from(attempt))
            }
            _ => None,
        }
    }
}
