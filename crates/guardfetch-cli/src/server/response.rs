//! Error responses for the proxy routes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guardfetch_core::fetch::{FailureKind, FetchError};

#[derive(Debug)]
pub enum ProxyError {
    Fetch(FetchError),
    /// The blocking fetch worker panicked or was cancelled.
    Worker(tokio::task::JoinError),
}

impl From<FetchError> for ProxyError {
    fn from(e: FetchError) -> Self {
        ProxyError::Fetch(e)
    }
}

impl From<tokio::task::JoinError> for ProxyError {
    fn from(e: tokio::task::JoinError) -> Self {
        ProxyError::Worker(e)
    }
}

pub fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::MalformedInput => StatusCode::BAD_REQUEST,
        FailureKind::Forbidden => StatusCode::FORBIDDEN,
        FailureKind::UpstreamError => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::Fetch(e) => {
                let status = status_for(e.kind());
                if status.is_server_error() {
                    tracing::warn!(%status, "proxy request failed: {}", e);
                } else {
                    tracing::info!(%status, "proxy request refused: {}", e);
                }
                (status, e.message().to_string()).into_response()
            }
            ProxyError::Worker(e) => {
                tracing::error!("fetch worker failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
