//! Text fetch (route `/`).

use super::{
    check_header_value, FetchError, FetchRequest, ProxyFetcher, COMPONENT, FORWARDED_HEADER,
};
use crate::span::{tags, SpanGuard, TraceSpan};

impl ProxyFetcher {
    /// Fetch `req.raw_url` and return the body as text.
    ///
    /// `span` belongs to the caller. It is tagged here and finished only when
    /// the fetch fails after admission; otherwise the caller's guard closes it.
    /// Any HTTP status is returned as a body; the status is tagged on the span.
    pub fn fetch_text<S: TraceSpan>(
        &self,
        req: &FetchRequest,
        span: &mut SpanGuard<S>,
    ) -> Result<String, FetchError> {
        let admitted = match self.admit(&req.raw_url) {
            Ok(a) => a,
            Err(e) => {
                span.log(&format!("fetch refused: {}", e));
                return Err(e);
            }
        };

        let mut headers: Vec<(&str, &str)> = Vec::new();
        if let Some(value) = req.extra_header.as_deref() {
            if let Err(e) = check_header_value(value) {
                span.log(&format!("fetch refused: {}", e));
                return Err(e);
            }
            headers.push((FORWARDED_HEADER, value));
        }

        span.tag(tags::PEER_ADDRESS, admitted.as_str());
        span.tag(tags::COMPONENT, COMPONENT);

        let response = match self.get_following(&admitted, &headers) {
            Ok(r) => r,
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(url = admitted.as_str(), "text fetch failed: {}", message);
                span.tag(tags::ERROR_KIND, e.kind_label());
                span.fail(&message);
                return Err(FetchError::Upstream(message));
            }
        };

        span.tag(tags::HTTP_STATUS_CODE, response.status);
        tracing::debug!(
            url = admitted.as_str(),
            status = response.status,
            bytes = response.body.len(),
            "text fetch done"
        );
        Ok(String::from_utf8_lossy(&response.body).into_owned())
    }
}
