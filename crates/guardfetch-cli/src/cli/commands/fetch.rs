//! `guardfetch fetch <url>` – one-shot text fetch.

use anyhow::{Context, Result};
use guardfetch_core::config::ProxyConfig;
use guardfetch_core::fetch::{FetchRequest, ProxyFetcher};
use guardfetch_core::span::tags;

pub async fn run_fetch(cfg: &ProxyConfig, url: String, header: Option<String>) -> Result<()> {
    let fetcher = ProxyFetcher::from_config(cfg);
    let req = FetchRequest {
        raw_url: url,
        extra_header: header,
    };
    let body = tokio::task::spawn_blocking(move || {
        let mut span = fetcher.start_span("fetch");
        span.tag(tags::SPAN_KIND, tags::SPAN_KIND_CLIENT);
        fetcher.fetch_text(&req, &mut span)
    })
    .await
    .context("fetch task join")??;
    print!("{}", body);
    Ok(())
}
