//! `guardfetch check <url>` – print the admission decision.

use anyhow::Result;
use guardfetch_core::admission::{AdmissionControl, AdmissionDecision};
use guardfetch_core::config::ProxyConfig;

pub fn run_check(cfg: &ProxyConfig, url: &str) -> Result<()> {
    let control = AdmissionControl::new(cfg.allow_list());
    println!("{}", describe(&control.admit(url)));
    Ok(())
}

fn describe(decision: &AdmissionDecision) -> String {
    match decision {
        AdmissionDecision::Allowed(admitted) => {
            format!("allowed host={} url={}", admitted.host(), admitted.as_str())
        }
        AdmissionDecision::Denied(reason) => format!("denied: {}", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardfetch_core::admission::AllowList;

    #[test]
    fn describe_allowed_and_denied() {
        let control = AdmissionControl::new(AllowList::new(["example.com"]));
        assert_eq!(
            describe(&control.admit("http://Example.com/x")),
            "allowed host=example.com url=http://example.com/x"
        );
        assert_eq!(
            describe(&control.admit("http://evil.com/")),
            "denied: domain not allowed"
        );
        assert_eq!(
            describe(&control.admit("ftp://example.com/")),
            "denied: Invalid or unsupported URL format"
        );
    }
}
