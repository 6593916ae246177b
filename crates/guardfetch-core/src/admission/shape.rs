//! Syntactic URL filter: scheme `http`/`https`, non-empty authority, optional path.
//!
//! This does not exclude loopback, link-local or private addresses. The
//! allow-list is the only authorization lever.

use regex_lite::Regex;
use std::sync::OnceLock;

const URL_SHAPE: &str = r"^(https?://)[^/]+(/.*)?$";

fn url_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_SHAPE).expect("URL shape pattern compiles"))
}

/// True if `raw` has the `http(s)://authority[/path]` shape.
pub fn has_fetchable_shape(raw: &str) -> bool {
    url_shape().is_match(raw)
}
