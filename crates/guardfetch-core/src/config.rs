use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::admission::AllowList;

/// Outbound transport settings (optional `[transport]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Upper bound in seconds for a whole fetch, connect included.
    pub timeout_secs: u64,
    /// Follow 3xx responses. Every hop target is admitted like the first URL.
    pub follow_redirects: bool,
    /// Redirect hop limit when `follow_redirects` is on.
    pub max_redirects: u32,
    /// Idle curl handles kept for connection reuse across requests.
    pub max_idle_handles: usize,
    /// Abort fetches whose body grows past this many bytes (None = no cap).
    pub max_body_bytes: Option<u64>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            timeout_secs: 30,
            follow_redirects: false,
            max_redirects: 5,
            max_idle_handles: 16,
            max_body_bytes: None,
        }
    }
}

impl TransportConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Global configuration loaded from `~/.config/guardfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Address the HTTP front end binds to.
    pub listen_addr: String,
    /// Hostnames that may be fetched (compared case-insensitively, no wildcards).
    pub allow_list: Vec<String>,
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            allow_list: vec!["example.com".to_string(), "api.example.com".to_string()],
            transport: TransportConfig::default(),
        }
    }
}

impl ProxyConfig {
    /// Build the read-only allow-list handed to admission control.
    pub fn allow_list(&self) -> AllowList {
        AllowList::new(&self.allow_list)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("guardfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from(path: &Path) -> Result<ProxyConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: ProxyConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ProxyConfig> {
    let path = config_path()?;
    init_at(&path)
}

/// Load `path`, writing the default config there first if it is missing.
pub fn init_at(path: &Path) -> Result<ProxyConfig> {
    if !path.exists() {
        let default_cfg = ProxyConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(path)
}
