//! Span-lifecycle spy for tests, here and in dependent crates
//! (`test-util` feature).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{TagValue, TraceSpan, Tracer};

/// Everything a [`RecordingSpan`] was told.
#[derive(Debug, Default, Clone)]
pub struct SpanRecord {
    pub operation: String,
    pub tags: Vec<(String, TagValue)>,
    pub logs: Vec<String>,
    pub finish_count: u32,
}

impl SpanRecord {
    /// Last value set for `key`.
    pub fn tag(&self, key: &str) -> Option<&TagValue> {
        self.tags.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Span that writes everything into a shared record.
pub struct RecordingSpan {
    record: Arc<Mutex<SpanRecord>>,
}

impl RecordingSpan {
    pub fn new(operation: &str) -> (Self, Arc<Mutex<SpanRecord>>) {
        let record = Arc::new(Mutex::new(SpanRecord {
            operation: operation.to_string(),
            ..SpanRecord::default()
        }));
        (
            Self {
                record: Arc::clone(&record),
            },
            record,
        )
    }
}

impl TraceSpan for RecordingSpan {
    fn set_tag(&mut self, key: &'static str, value: TagValue) {
        lock(&self.record).tags.push((key.to_string(), value));
    }

    fn log(&mut self, message: &str) {
        lock(&self.record).logs.push(message.to_string());
    }

    fn finish(&mut self) {
        lock(&self.record).finish_count += 1;
    }
}

/// Tracer that keeps a record of every span it started.
#[derive(Default, Clone)]
pub struct RecordingTracer {
    spans: Arc<Mutex<Vec<Arc<Mutex<SpanRecord>>>>>,
}

impl RecordingTracer {
    /// Snapshot of every span started so far, in start order.
    pub fn records(&self) -> Vec<SpanRecord> {
        lock(&self.spans).iter().map(|r| lock(r).clone()).collect()
    }
}

impl Tracer for RecordingTracer {
    fn start_span(&self, operation: &'static str) -> Box<dyn TraceSpan> {
        let (span, record) = RecordingSpan::new(operation);
        lock(&self.spans).push(record);
        Box::new(span)
    }
}
