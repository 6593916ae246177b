//! Structured fetch failures.

use crate::admission::DenyReason;

/// Which side of the proxy a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Bad URL shape, unparseable URL or unusable header value. Client error.
    MalformedInput,
    /// Host not on the allow-list. Client error.
    Forbidden,
    /// Transport failure, non-200 image response or body read failure. Server error.
    UpstreamError,
}

/// Failure returned by `fetch_text` / `fetch_image`. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    MalformedInput(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Upstream(String),
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::MalformedInput(_) => FailureKind::MalformedInput,
            FetchError::Forbidden(_) => FailureKind::Forbidden,
            FetchError::Upstream(_) => FailureKind::UpstreamError,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FetchError::MalformedInput(m) | FetchError::Forbidden(m) | FetchError::Upstream(m) => m,
        }
    }
}

impl From<DenyReason> for FetchError {
    fn from(reason: DenyReason) -> Self {
        if reason.is_malformed_input() {
            FetchError::MalformedInput(reason.as_str().to_string())
        } else {
            FetchError::Forbidden(reason.as_str().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_maps_to_kind() {
        assert_eq!(
            FetchError::from(DenyReason::InvalidFormat),
            FetchError::MalformedInput("Invalid or unsupported URL format".to_string())
        );
        assert_eq!(
            FetchError::from(DenyReason::Malformed).kind(),
            FailureKind::MalformedInput
        );
        let forbidden = FetchError::from(DenyReason::DomainNotAllowed);
        assert_eq!(forbidden.kind(), FailureKind::Forbidden);
        assert_eq!(forbidden.message(), "domain not allowed");
    }

    #[test]
    fn display_is_the_message() {
        let e = FetchError::Upstream("Failed to fetch image, HTTP code: 404".to_string());
        assert_eq!(e.to_string(), "Failed to fetch image, HTTP code: 404");
    }
}
