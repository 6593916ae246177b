//! [`TraceSpan`] backed by the `tracing` crate.
//!
//! Tags become span fields (declared up front, so unknown keys are dropped),
//! log lines become events parented on the span, and `finish` emits a closing
//! event with the elapsed time before releasing the span handle.

use std::time::Instant;

use tracing::field::Empty;

use super::{TagValue, TraceSpan, Tracer};

pub struct TracingSpan {
    span: tracing::Span,
    operation: &'static str,
    started: Instant,
}

impl TracingSpan {
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::info_span!(
            "fetch",
            operation = operation,
            error = Empty,
            error.kind = Empty,
            peer.address = Empty,
            component = Empty,
            span.kind = Empty,
            http.host = Empty,
            http.status_code = Empty
        );
        Self {
            span,
            operation,
            started: Instant::now(),
        }
    }
}

impl TraceSpan for TracingSpan {
    fn set_tag(&mut self, key: &'static str, value: TagValue) {
        match value {
            TagValue::Str(s) => self.span.record(key, s.as_str()),
            TagValue::Bool(b) => self.span.record(key, b),
            TagValue::Int(n) => self.span.record(key, n),
        };
    }

    fn log(&mut self, message: &str) {
        tracing::info!(parent: &self.span, "{}", message);
    }

    fn finish(&mut self) {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        tracing::debug!(
            parent: &self.span,
            elapsed_ms,
            "{} finished",
            self.operation
        );
        self.span = tracing::Span::none();
    }
}

/// Default tracer: every span is a [`TracingSpan`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTracer;

impl Tracer for TracingTracer {
    fn start_span(&self, operation: &'static str) -> Box<dyn TraceSpan> {
        Box::new(TracingSpan::new(operation))
    }
}
