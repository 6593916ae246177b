//! Tests for the global --config flag and config loading.

use super::parse;
use crate::cli::{load_config, CliCommand};
use std::path::PathBuf;

#[test]
fn cli_parse_global_config_before_subcommand() {
    let cli = parse(&["guardfetch", "--config", "/etc/guardfetch.toml", "serve"]);
    assert_eq!(cli.config, Some(PathBuf::from("/etc/guardfetch.toml")));
    assert!(matches!(cli.command, CliCommand::Serve { .. }));
}

#[test]
fn cli_parse_global_config_after_subcommand() {
    let cli = parse(&["guardfetch", "check", "http://example.com/", "--config", "c.toml"]);
    assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
}

#[test]
fn load_config_reads_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guardfetch.toml");
    std::fs::write(
        &path,
        "listen_addr = \"127.0.0.1:9999\"\nallow_list = [\"images.example.org\"]\n",
    )
    .unwrap();
    let cfg = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:9999");
    assert!(cfg.allow_list().contains("IMAGES.example.org"));
}

#[test]
fn load_config_missing_explicit_path_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
}
