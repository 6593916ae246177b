//! Route handlers. Fetches block on curl, so each runs on a blocking worker.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use guardfetch_core::fetch::{FetchRequest, ProxyFetcher};
use guardfetch_core::span::tags;
use serde::Deserialize;

use super::ProxyError;

/// Span the text route opens around each request.
pub(crate) const TEXT_SPAN: &str = "/";

#[derive(Debug, Deserialize)]
pub(crate) struct TextQuery {
    pub(crate) url: String,
    pub(crate) header: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageQuery {
    pub(crate) url: String,
}

pub(crate) async fn proxy_text(
    State(fetcher): State<ProxyFetcher>,
    headers: HeaderMap,
    Query(query): Query<TextQuery>,
) -> Result<String, ProxyError> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    tracing::info!(url = %query.url, %host, "proxy text request");

    let req = FetchRequest {
        raw_url: query.url,
        extra_header: Some(query.header),
    };
    let body = tokio::task::spawn_blocking(move || {
        let mut span = fetcher.start_span(TEXT_SPAN);
        span.tag(tags::SPAN_KIND, tags::SPAN_KIND_SERVER);
        span.tag(tags::HTTP_HOST, host);
        fetcher.fetch_text(&req, &mut span)
    })
    .await??;
    Ok(body)
}

pub(crate) async fn proxy_image(
    State(fetcher): State<ProxyFetcher>,
    Query(query): Query<ImageQuery>,
) -> Result<impl IntoResponse, ProxyError> {
    tracing::info!(url = %query.url, "proxy image request");

    let req = FetchRequest::new(query.url);
    let image = tokio::task::spawn_blocking(move || fetcher.fetch_image(&req)).await??;
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], image.data_uri()))
}
