//! Image fetch (route `/image`).
//!
//! The fetched bytes are never checked to be a JPEG; callers get whatever the
//! upstream served, base64-encoded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::{FetchError, FetchRequest, ProxyFetcher, COMPONENT};
use crate::span::{tags, SpanGuard};

/// Span operation name for image fetches.
pub const IMAGE_SPAN: &str = "/image";

/// Base64 payload of a fetched image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    payload: String,
}

impl ImageData {
    pub fn encode(bytes: &[u8]) -> Self {
        Self {
            payload: STANDARD.encode(bytes),
        }
    }

    /// Standard, padded base64 of the body.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// `data:image/jpg;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!("data:image/jpg;base64,{}", self.payload)
    }
}

impl ProxyFetcher {
    /// Fetch `req.raw_url` and return the body base64-encoded.
    ///
    /// Anything but HTTP 200 is a failure. `req.extra_header` is not forwarded.
    pub fn fetch_image(&self, req: &FetchRequest) -> Result<ImageData, FetchError> {
        let admitted = self.admit(&req.raw_url)?;

        let mut span = SpanGuard::new(self.tracer.start_span(IMAGE_SPAN));
        span.tag(tags::PEER_ADDRESS, req.raw_url.as_str());
        span.tag(tags::COMPONENT, COMPONENT);
        span.tag(tags::SPAN_KIND, tags::SPAN_KIND_CLIENT);

        let response = match self.get_following(&admitted, &[]) {
            Ok(r) => r,
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(url = admitted.as_str(), "image fetch failed: {}", message);
                span.tag(tags::ERROR_KIND, e.kind_label());
                span.fail(&message);
                return Err(FetchError::Upstream(message));
            }
        };

        span.tag(tags::HTTP_STATUS_CODE, response.status);
        if response.status != 200 {
            let message = format!("Failed to fetch image, HTTP code: {}", response.status);
            tracing::warn!(url = admitted.as_str(), "{}", message);
            span.fail(&message);
            return Err(FetchError::Upstream(message));
        }

        let image = ImageData::encode(&response.body);
        tracing::debug!(
            url = admitted.as_str(),
            bytes = response.body.len(),
            "image fetch done"
        );
        span.finish();
        Ok(image)
    }
}
