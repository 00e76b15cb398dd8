//! Errors surfaced by the dream analysis caller.
//!
//! Parsing never fails: a section the parser cannot locate is replaced by its fallback
//! string and is not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DreamError {
    /// Required input (dream description, image prompt) was empty.
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    /// Transport failure, timeout, or no upstream configured.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream answered with a non-success status.
    #[error("upstream error {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Upstream answered 2xx but the envelope had no usable text or image.
    #[error("malformed upstream response: {0}")]
    UpstreamMalformed(String),
}

impl DreamError {
    /// Transport failures and 5xx responses are worth one more attempt; 4xx never are.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::UpstreamUnavailable(_) => true,
            Self::UpstreamStatus { status, .. } => *status >= 500,
            Self::MissingInput(_) | Self::UpstreamMalformed(_) => false,
        }
    }

    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::UpstreamUnavailable(format!("timed out: {}", e))
        } else {
            Self::UpstreamUnavailable(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_and_server_errors_retry() {
        assert!(DreamError::UpstreamUnavailable("reset".into()).is_retryable());
        assert!(DreamError::UpstreamStatus { status: 503, body: String::new() }.is_retryable());
        assert!(!DreamError::UpstreamStatus { status: 429, body: String::new() }.is_retryable());
        assert!(!DreamError::UpstreamStatus { status: 400, body: String::new() }.is_retryable());
        assert!(!DreamError::UpstreamMalformed("no candidates".into()).is_retryable());
        assert!(!DreamError::MissingInput("description").is_retryable());
    }

    #[test]
    fn display_includes_status_and_body() {
        let e = DreamError::UpstreamStatus { status: 502, body: "bad gateway".into() };
        assert_eq!(e.to_string(), "upstream error 502: bad gateway");
    }
}
