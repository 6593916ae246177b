//! CLI for the guardfetch proxy.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use guardfetch_core::config::{self, ProxyConfig};
use std::path::PathBuf;

use commands::{run_check, run_fetch, run_image, run_serve};

/// Top-level CLI for the guardfetch proxy.
#[derive(Debug, Parser)]
#[command(name = "guardfetch")]
#[command(about = "guardfetch: allow-listed URL fetch proxy", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/guardfetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Serve the `/` and `/image` proxy routes over HTTP.
    Serve {
        /// Address to bind (overrides `listen_addr` from the config).
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,
    },

    /// Fetch a URL once and print its body as text.
    Fetch {
        /// HTTP/HTTPS URL on the allow-list.
        url: String,
        /// Value forwarded as the Accept-Language header.
        #[arg(long, value_name = "VALUE")]
        header: Option<String>,
    },

    /// Fetch an image once and print it as a base64 data URI.
    Image {
        /// HTTP/HTTPS URL on the allow-list.
        url: String,
    },

    /// Show the admission decision for a URL without fetching it.
    Check {
        url: String,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<ProxyConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_ref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Serve { listen } => run_serve(&cfg, listen.as_deref()).await?,
            CliCommand::Fetch { url, header } => run_fetch(&cfg, url, header).await?,
            CliCommand::Image { url } => run_image(&cfg, url).await?,
            CliCommand::Check { url } => run_check(&cfg, &url)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
