//! Trace span capability used by the fetch executor.
//!
//! The executor only needs to tag a span, attach log lines and finish it.
//! [`Tracer`] creates spans the executor owns; callers can also lend their own
//! span. [`SpanGuard`] makes "finished exactly once" hold on every exit path.

#[cfg(any(test, feature = "test-util"))]
pub mod recording;
mod tracing_span;

pub use tracing_span::{TracingSpan, TracingTracer};

/// Tag keys shared by both fetch paths.
pub mod tags {
    pub const ERROR: &str = "error";
    pub const ERROR_KIND: &str = "error.kind";
    pub const PEER_ADDRESS: &str = "peer.address";
    pub const COMPONENT: &str = "component";
    pub const SPAN_KIND: &str = "span.kind";
    pub const HTTP_HOST: &str = "http.host";
    pub const HTTP_STATUS_CODE: &str = "http.status_code";

    pub const SPAN_KIND_CLIENT: &str = "client";
    pub const SPAN_KIND_SERVER: &str = "server";
}

/// Value attached to a span tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Str(String),
    Bool(bool),
    Int(i64),
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Str(s.to_string())
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::Str(s)
    }
}

impl From<bool> for TagValue {
    fn from(b: bool) -> Self {
        TagValue::Bool(b)
    }
}

impl From<u32> for TagValue {
    fn from(n: u32) -> Self {
        TagValue::Int(i64::from(n))
    }
}

/// A taggable, finishable unit of tracing.
pub trait TraceSpan: Send {
    fn set_tag(&mut self, key: &'static str, value: TagValue);
    fn log(&mut self, message: &str);
    /// Close the span. Callers go through [`SpanGuard`], which calls this once.
    fn finish(&mut self);
}

impl<S: TraceSpan + ?Sized> TraceSpan for Box<S> {
    fn set_tag(&mut self, key: &'static str, value: TagValue) {
        (**self).set_tag(key, value)
    }

    fn log(&mut self, message: &str) {
        (**self).log(message)
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}

/// Creates spans the fetch executor owns.
pub trait Tracer: Send + Sync {
    fn start_span(&self, operation: &'static str) -> Box<dyn TraceSpan>;
}

/// Scope guard around a span: finishes it at most once, and on drop if nobody did.
pub struct SpanGuard<S: TraceSpan> {
    span: S,
    finished: bool,
}

impl<S: TraceSpan> SpanGuard<S> {
    pub fn new(span: S) -> Self {
        Self {
            span,
            finished: false,
        }
    }

    pub fn tag(&mut self, key: &'static str, value: impl Into<TagValue>) {
        if !self.finished {
            self.span.set_tag(key, value.into());
        }
    }

    pub fn log(&mut self, message: &str) {
        if !self.finished {
            self.span.log(message);
        }
    }

    /// Mark the span errored, attach `message`, then finish it.
    pub fn fail(&mut self, message: &str) {
        self.tag(tags::ERROR, true);
        self.log(message);
        self.finish();
    }

    pub fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            self.span.finish();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<S: TraceSpan> Drop for SpanGuard<S> {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::recording::RecordingSpan;
    use super::*;

    #[test]
    fn guard_finishes_on_drop() {
        let (span, record) = RecordingSpan::new("op");
        {
            let mut guard = SpanGuard::new(span);
            guard.tag(tags::COMPONENT, "curl");
        }
        let r = record.lock().unwrap();
        assert_eq!(r.finish_count, 1);
        assert_eq!(r.tag(tags::COMPONENT), Some(&TagValue::from("curl")));
    }

    #[test]
    fn explicit_finish_is_not_repeated_on_drop() {
        let (span, record) = RecordingSpan::new("op");
        {
            let mut guard = SpanGuard::new(span);
            guard.finish();
            guard.finish();
            assert!(guard.is_finished());
        }
        assert_eq!(record.lock().unwrap().finish_count, 1);
    }

    #[test]
    fn fail_tags_logs_and_finishes() {
        let (span, record) = RecordingSpan::new("op");
        let mut guard = SpanGuard::new(span);
        guard.fail("connection refused");
        guard.tag(tags::HTTP_STATUS_CODE, 200u32);
        drop(guard);

        let r = record.lock().unwrap();
        assert_eq!(r.tag(tags::ERROR), Some(&TagValue::Bool(true)));
        assert_eq!(r.logs, vec!["connection refused".to_string()]);
        assert_eq!(r.finish_count, 1);
        assert!(r.tag(tags::HTTP_STATUS_CODE).is_none(), "no tags after finish");
    }

    #[test]
    fn boxed_span_forwards() {
        let (span, record) = RecordingSpan::new("op");
        let boxed: Box<dyn TraceSpan> = Box::new(span);
        let mut guard = SpanGuard::new(boxed);
        guard.log("hello");
        drop(guard);
        let r = record.lock().unwrap();
        assert_eq!(r.logs, vec!["hello".to_string()]);
        assert_eq!(r.finish_count, 1);
    }
}
