//! `guardfetch image <url>` – one-shot image fetch, printed as a data URI.

use anyhow::{Context, Result};
use guardfetch_core::config::ProxyConfig;
use guardfetch_core::fetch::{FetchRequest, ProxyFetcher};

pub async fn run_image(cfg: &ProxyConfig, url: String) -> Result<()> {
    let fetcher = ProxyFetcher::from_config(cfg);
    let req = FetchRequest::new(url);
    let image = tokio::task::spawn_blocking(move || fetcher.fetch_image(&req))
        .await
        .context("image task join")??;
    println!("{}", image.data_uri());
    Ok(())
}
