use std::collections::HashSet;
use std::sync::Arc;

/// Read-only set of hostnames that may be fetched.
///
/// Entries are stored lowercased; lookups lowercase the candidate, so matching
/// is case-insensitive. There is no wildcard or parent-domain matching:
/// `example.com` does not admit `api.example.com`. Cloning shares the set.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    hosts: Arc<HashSet<String>>,
}

impl AllowList {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hosts = hosts
            .into_iter()
            .map(|h| h.as_ref().trim().to_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
        Self {
            hosts: Arc::new(hosts),
        }
    }

    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(&host.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Entries in sorted order (for display and logs).
    pub fn hosts(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.hosts.iter().map(String::as_str).collect();
        v.sort_unstable();
        v
    }
}
