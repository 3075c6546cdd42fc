//! Feed fetch error types.

/// Errors from fetching the station feed.
///
/// The cache memoizes a failed fetch for the rest of its window and hands
/// the same error to every caller, so the variants own their message text
/// instead of wrapping the non-cloneable `reqwest::Error`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FeedError {
    /// Network-level failure (connection refused, DNS, TLS and friends).
    #[error("feed request failed: {message}")]
    Http { message: String },

    /// The request hit the client timeout.
    #[error("feed request timed out")]
    Timeout,

    /// The feed answered with a non-success status.
    #[error("feed returned status {status}")]
    Status { status: u16 },
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout
        } else {
            FeedError::Http {
                message: err.to_string(),
            }
        }
    }
}
