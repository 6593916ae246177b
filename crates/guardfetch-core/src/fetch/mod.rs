//! Outbound fetch executor.
//!
//! Both operations run admission first; a denied URL never reaches the
//! transport. `fetch_text` annotates a span lent by the caller and only
//! finishes it when the fetch fails. `fetch_image` owns its `/image` span and
//! finishes it on every exit.

mod error;
mod image;
mod redirect;
mod text;

pub use error::{FailureKind, FetchError};
pub use image::{ImageData, IMAGE_SPAN};

use std::sync::Arc;

use crate::admission::{AdmissionControl, AdmissionDecision, AdmittedUrl};
use crate::config::ProxyConfig;
use crate::span::{SpanGuard, TraceSpan, Tracer, TracingTracer};
use crate::transport::{CurlTransport, HttpTransport};

/// Header the caller-supplied extra header is forwarded as.
pub const FORWARDED_HEADER: &str = "Accept-Language";

/// Value the `component` span tag carries for outbound fetches.
pub const COMPONENT: &str = "curl";

/// Raw, untrusted request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub raw_url: String,
    pub extra_header: Option<String>,
}

impl FetchRequest {
    pub fn new(raw_url: impl Into<String>) -> Self {
        Self {
            raw_url: raw_url.into(),
            extra_header: None,
        }
    }

    pub fn with_header(mut self, value: impl Into<String>) -> Self {
        self.extra_header = Some(value.into());
        self
    }
}

/// Admission plus transport plus tracer. Cheap to clone; share one per process.
#[derive(Clone)]
pub struct ProxyFetcher {
    admission: AdmissionControl,
    transport: Arc<dyn HttpTransport>,
    tracer: Arc<dyn Tracer>,
    /// Redirect hop limit; `None` returns 3xx responses as they are.
    max_redirects: Option<u32>,
}

impl ProxyFetcher {
    pub fn new(
        admission: AdmissionControl,
        transport: Arc<dyn HttpTransport>,
        tracer: Arc<dyn Tracer>,
    ) -> Self {
        Self {
            admission,
            transport,
            tracer,
            max_redirects: None,
        }
    }

    /// Follow up to `max` redirects, admitting every target first.
    pub fn with_redirects(mut self, max: u32) -> Self {
        self.max_redirects = Some(max);
        self
    }

    /// Curl transport and `tracing` spans, configured from `cfg`.
    pub fn from_config(cfg: &ProxyConfig) -> Self {
        let fetcher = Self::new(
            AdmissionControl::new(cfg.allow_list()),
            Arc::new(CurlTransport::new(cfg.transport.clone())),
            Arc::new(TracingTracer),
        );
        if cfg.transport.follow_redirects {
            fetcher.with_redirects(cfg.transport.max_redirects)
        } else {
            fetcher
        }
    }

    pub fn admission(&self) -> &AdmissionControl {
        &self.admission
    }

    /// Open a span from this fetcher's tracer, e.g. for a caller that lends
    /// it to [`ProxyFetcher::fetch_text`].
    pub fn start_span(&self, operation: &'static str) -> SpanGuard<Box<dyn TraceSpan>> {
        SpanGuard::new(self.tracer.start_span(operation))
    }

    fn admit(&self, raw_url: &str) -> Result<AdmittedUrl, FetchError> {
        match self.admission.admit(raw_url) {
            AdmissionDecision::Allowed(admitted) => Ok(admitted),
            AdmissionDecision::Denied(reason) => {
                tracing::info!(url = raw_url, %reason, "fetch refused");
                Err(reason.into())
            }
        }
    }
}

/// Reject header values that would split the outbound request.
fn check_header_value(value: &str) -> Result<(), FetchError> {
    if value.bytes().any(|b| b == b'\r' || b == b'\n' || b == 0) {
        return Err(FetchError::MalformedInput("invalid header value".to_string()));
    }
    Ok(())
}
