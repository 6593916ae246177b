//! Redirect hops. Each `Location` target goes through admission before it is
//! fetched, so an allowed host cannot bounce the proxy somewhere else.

use super::ProxyFetcher;
use crate::admission::{AdmissionDecision, AdmittedUrl, DenyReason};
use crate::transport::{ErrorKind, HttpResponse, TransportError};

/// A GET, or one of its redirect hops, produced no usable response.
#[derive(Debug, thiserror::Error)]
pub(super) enum HopError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("redirect refused: {0}")]
    Refused(DenyReason),
    #[error("too many redirects (limit {0})")]
    TooMany(u32),
}

impl HopError {
    /// Value for the `error.kind` span tag.
    pub(super) fn kind_label(&self) -> &'static str {
        match self {
            HopError::Transport(e) => e.kind().as_str(),
            HopError::Refused(_) => "redirect_refused",
            HopError::TooMany(_) => ErrorKind::TooManyRedirects.as_str(),
        }
    }
}

impl ProxyFetcher {
    /// GET `first`, then follow up to `max_redirects` admitted hops.
    ///
    /// With redirects off the 3xx response itself is returned.
    pub(super) fn get_following(
        &self,
        first: &AdmittedUrl,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, HopError> {
        let mut response = self.transport.get(first.as_str(), headers)?;
        let Some(max) = self.max_redirects else {
            return Ok(response);
        };

        let mut hops = 0;
        while response.is_redirect() {
            let Some(location) = response.location.take() else {
                break;
            };
            if hops == max {
                tracing::warn!(url = first.as_str(), limit = max, "redirect limit reached");
                return Err(HopError::TooMany(max));
            }
            hops += 1;

            let next = match self.admission.admit(&location) {
                AdmissionDecision::Allowed(next) => next,
                AdmissionDecision::Denied(reason) => {
                    tracing::warn!(
                        url = first.as_str(),
                        location = location.as_str(),
                        %reason,
                        "redirect refused"
                    );
                    return Err(HopError::Refused(reason));
                }
            };
            tracing::debug!(url = next.as_str(), hop = hops, "following redirect");
            response = self.transport.get(next.as_str(), headers)?;
        }
        Ok(response)
    }
}
