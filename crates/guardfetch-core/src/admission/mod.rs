//! URL admission control.
//!
//! Decides, without any network access, whether a caller-supplied URL may be
//! fetched:
//! - the raw string must have the `http(s)://authority[/path]` shape
//! - it must parse as a URL with a host
//! - the host must be on the [`AllowList`] (case-insensitive, literal match)
//!
//! DNS is never consulted, so an allow-listed name whose record points at an
//! internal address is still admitted.

mod allow_list;
mod shape;

pub use allow_list::AllowList;
pub use shape::has_fetchable_shape;

use url::Url;

/// Why a URL was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Failed the scheme/authority shape check.
    InvalidFormat,
    /// Passed the shape check but did not parse, or parsed without a host.
    Malformed,
    /// Host is not on the allow-list.
    DomainNotAllowed,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::InvalidFormat => "Invalid or unsupported URL format",
            DenyReason::Malformed => "malformed URL",
            DenyReason::DomainNotAllowed => "domain not allowed",
        }
    }

    /// True for refusals caused by the request's syntax rather than policy.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, DenyReason::DomainNotAllowed)
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL that passed admission.
///
/// Holds the parsed URL so the fetch uses the same interpretation of the
/// string that the host check saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedUrl {
    host: String,
    url: Url,
}

impl AdmittedUrl {
    /// Lowercased host that matched the allow-list.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Serialized form handed to the transport.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Outcome of [`AdmissionControl::admit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionDecision {
    Allowed(AdmittedUrl),
    Denied(DenyReason),
}

impl AdmissionDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AdmissionDecision::Allowed(_))
    }

    pub fn normalized_host(&self) -> Option<&str> {
        match self {
            AdmissionDecision::Allowed(admitted) => Some(admitted.host()),
            AdmissionDecision::Denied(_) => None,
        }
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            AdmissionDecision::Allowed(_) => None,
            AdmissionDecision::Denied(reason) => Some(*reason),
        }
    }
}

/// Admission policy over a fixed allow-list. Cheap to clone; safe to share.
#[derive(Debug, Clone)]
pub struct AdmissionControl {
    allow_list: AllowList,
}

impl AdmissionControl {
    pub fn new(allow_list: AllowList) -> Self {
        Self { allow_list }
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Evaluate `raw_url` against the shape check, the URL grammar and the allow-list.
    pub fn admit(&self, raw_url: &str) -> AdmissionDecision {
        if !has_fetchable_shape(raw_url) {
            return AdmissionDecision::Denied(DenyReason::InvalidFormat);
        }

        let url = match Url::parse(raw_url) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!(url = raw_url, "url parse failed: {}", e);
                return AdmissionDecision::Denied(DenyReason::Malformed);
            }
        };

        let host = match url.host_str() {
            Some(h) if !h.is_empty() => h.to_lowercase(),
            _ => return AdmissionDecision::Denied(DenyReason::Malformed),
        };

        if !self.allow_list.contains(&host) {
            return AdmissionDecision::Denied(DenyReason::DomainNotAllowed);
        }

        AdmissionDecision::Allowed(AdmittedUrl { host, url })
    }
}
