//! Tests for serve, fetch, image, check.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_serve_defaults() {
    match parse(&["guardfetch", "serve"]).command {
        CliCommand::Serve { listen } => assert!(listen.is_none()),
        _ => panic!("expected Serve"),
    }
}

#[test]
fn cli_parse_serve_listen() {
    match parse(&["guardfetch", "serve", "--listen", "0.0.0.0:9000"]).command {
        CliCommand::Serve { listen } => assert_eq!(listen.as_deref(), Some("0.0.0.0:9000")),
        _ => panic!("expected Serve"),
    }
}

#[test]
fn cli_parse_fetch_with_header() {
    match parse(&[
        "guardfetch",
        "fetch",
        "http://example.com/page",
        "--header",
        "en-US",
    ])
    .command
    {
        CliCommand::Fetch { url, header } => {
            assert_eq!(url, "http://example.com/page");
            assert_eq!(header.as_deref(), Some("en-US"));
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_without_header() {
    match parse(&["guardfetch", "fetch", "https://api.example.com/"]).command {
        CliCommand::Fetch { url, header } => {
            assert_eq!(url, "https://api.example.com/");
            assert!(header.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_image() {
    match parse(&["guardfetch", "image", "http://example.com/a.jpg"]).command {
        CliCommand::Image { url } => assert_eq!(url, "http://example.com/a.jpg"),
        _ => panic!("expected Image"),
    }
}

#[test]
fn cli_parse_check() {
    match parse(&["guardfetch", "check", "ftp://example.com/"]).command {
        CliCommand::Check { url } => assert_eq!(url, "ftp://example.com/"),
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_fetch_requires_url() {
    assert!(Cli::try_parse_from(["guardfetch", "fetch"]).is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["guardfetch", "crawl"]).is_err());
}
