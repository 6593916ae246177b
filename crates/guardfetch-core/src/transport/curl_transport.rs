//! libcurl transport with a small pool of reusable `Easy` handles.
//!
//! A handle keeps its connection cache across `reset()`, so returning handles
//! to the pool lets later fetches to the same origin reuse connections. A
//! checked-out handle goes back to the pool when its guard drops, on success
//! and on every error path.

use std::sync::{Mutex, PoisonError};

use curl::easy::{Easy, List};

use super::{HttpResponse, HttpTransport, TransportError};
use crate::config::TransportConfig;

/// Shared, thread-safe curl transport. Create once and reuse.
pub struct CurlTransport {
    config: TransportConfig,
    idle: Mutex<Vec<Easy>>,
}

/// Returns the handle to the pool when dropped.
struct PooledHandle<'a> {
    owner: &'a CurlTransport,
    easy: Option<Easy>,
}

impl PooledHandle<'_> {
    fn easy(&mut self) -> &mut Easy {
        self.easy.get_or_insert_with(Easy::new)
    }
}

impl Drop for PooledHandle<'_> {
    fn drop(&mut self) {
        if let Some(mut easy) = self.easy.take() {
            easy.reset();
            let mut idle = self.owner.idle.lock().unwrap_or_else(PoisonError::into_inner);
            if idle.len() < self.owner.config.max_idle_handles {
                idle.push(easy);
            }
        }
    }
}

impl CurlTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            idle: Mutex::new(Vec::new()),
        }
    }

    /// Number of handles currently parked in the pool.
    pub fn idle_handles(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn checkout(&self) -> PooledHandle<'_> {
        let easy = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_else(Easy::new);
        PooledHandle {
            owner: self,
            easy: Some(easy),
        }
    }

    fn configure(
        &self,
        easy: &mut Easy,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<(), curl::Error> {
        easy.url(url)?;
        easy.get(true)?;
        // Timeouts from worker threads must not rely on SIGALRM.
        easy.signal(false)?;
        // Redirect hops are re-admitted by the caller, never followed here.
        easy.follow_location(false)?;
        easy.connect_timeout(self.config.connect_timeout())?;
        easy.timeout(self.config.timeout())?;

        // Build curl list for custom headers (e.g. "Name: value").
        if !headers.is_empty() {
            let mut list = List::new();
            for (name, value) in headers {
                list.append(&header_line(name, value))?;
            }
            easy.http_headers(list)?;
        }
        Ok(())
    }
}

impl HttpTransport for CurlTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
        let mut handle = self.checkout();
        let easy = handle.easy();
        self.configure(easy, url, headers)?;

        let limit = self.config.max_body_bytes;
        let mut body: Vec<u8> = Vec::new();
        let mut over_limit = false;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if let Some(limit) = limit {
                    if body.len() as u64 + data.len() as u64 > limit {
                        over_limit = true;
                        return Ok(0); // abort transfer
                    }
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };

        if over_limit {
            return Err(TransportError::BodyTooLarge {
                limit: limit.unwrap_or_default(),
            });
        }
        performed?;

        let status = easy.response_code()?;
        let location = easy.redirect_url()?.map(str::to_string);
        tracing::debug!(url, status, bytes = body.len(), "GET completed");
        Ok(HttpResponse {
            status,
            body,
            location,
        })
    }
}

/// `Name: value`, or `Name;` for an empty value, which curl would otherwise drop.
fn header_line(name: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{};", name.trim())
    } else {
        format!("{}: {}", name.trim(), value)
    }
}
