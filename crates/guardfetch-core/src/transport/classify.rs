//! Classify curl errors for span tags and logs.

/// Coarse class of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connect or total timeout expired.
    Timeout,
    /// DNS, refused, reset or otherwise broken connection.
    Connection,
    /// TLS handshake or certificate verification failed.
    Tls,
    /// Redirect limit hit while following redirects.
    TooManyRedirects,
    /// Body exceeded the configured size cap.
    TooLarge,
    Other,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::Connection => "connection",
            ErrorKind::Tls => "tls",
            ErrorKind::TooManyRedirects => "too_many_redirects",
            ErrorKind::TooLarge => "too_large",
            ErrorKind::Other => "other",
        }
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    if e.is_ssl_connect_error() || e.is_peer_failed_verification() || e.is_ssl_certproblem() {
        return ErrorKind::Tls;
    }
    if e.is_too_many_redirects() {
        return ErrorKind::TooManyRedirects;
    }
    ErrorKind::Other
}
