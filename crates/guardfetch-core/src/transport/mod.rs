//! Outbound HTTP transport.
//!
//! The fetch executor talks to [`HttpTransport`]; [`CurlTransport`] is the
//! libcurl implementation shared by all requests for the process lifetime.

mod classify;
mod curl_transport;

pub use self::classify::{classify_curl_error, ErrorKind};
pub use self::curl_transport::CurlTransport;

/// Status and full body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
    /// Absolute redirect target of a 3xx answer. Never followed by the transport.
    pub location: Option<String>,
}

impl HttpResponse {
    pub fn new(status: u32, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.status, 301 | 302 | 303 | 307 | 308)
    }
}

/// Failure below the HTTP layer (connect, TLS, timeout, body read).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Curl(#[from] ::curl::Error),
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: u64 },
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::Curl(e) => classify_curl_error(e),
            TransportError::BodyTooLarge { .. } => ErrorKind::TooLarge,
            TransportError::Other(_) => ErrorKind::Other,
        }
    }
}

/// Blocking GET transport. Implementations must be safe to share across
/// concurrent requests.
pub trait HttpTransport: Send + Sync {
    /// GET `url` with the extra request `headers` (name, value).
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError>;
}
