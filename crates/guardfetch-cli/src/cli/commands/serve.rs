//! `guardfetch serve` – run the HTTP front end until Ctrl-C.

use anyhow::{Context, Result};
use guardfetch_core::config::ProxyConfig;
use guardfetch_core::fetch::ProxyFetcher;

use crate::server;

pub async fn run_serve(cfg: &ProxyConfig, listen: Option<&str>) -> Result<()> {
    let addr = listen.unwrap_or(cfg.listen_addr.as_str());
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    let local = listener.local_addr()?;

    let fetcher = ProxyFetcher::from_config(cfg);
    tracing::info!(
        addr = %local,
        allow_list = ?fetcher.admission().allow_list().hosts(),
        "serving proxy routes"
    );
    if fetcher.admission().allow_list().is_empty() {
        tracing::warn!("allow-list is empty; every fetch will be refused");
    }
    println!("guardfetch listening on http://{}", local);

    axum::serve(listener, server::router(fetcher))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown requested");
        })
        .await
        .context("http server")?;
    Ok(())
}
