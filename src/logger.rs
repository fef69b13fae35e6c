//! Structured logging sink and ambient fields.
//!
//! A [`Logger`] is what the access-log middleware writes to: a [`LogSink`]
//! plus the fields every entry should carry (a service name, a region, ...).
//! The sink decides where entries go. [`TracingSink`] forwards them to
//! `tracing`; [`MemorySink`](crate::testing::MemorySink) keeps them for tests.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::Level;

/// A nested field mapping.
pub type Fields = Map<String, Value>;

/// One structured log record, already merged with the logger's ambient fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub level: Level,
    pub fields: Fields,
}

/// Destination for log entries.
///
/// Shared by every in-flight request, so implementations must tolerate
/// concurrent calls. Emission is fire-and-forget: a sink that cannot deliver
/// an entry deals with that itself.
pub trait LogSink: Send + Sync + 'static {
    fn emit(&self, entry: Entry);
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn emit(&self, entry: Entry) {
        (**self).emit(entry)
    }
}

// ── Logger ────────────────────────────────────────────────────────────────────

/// A sink plus ambient fields. Cloning is cheap.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    fields: Fields,
}

impl Logger {
    pub fn new(sink: impl LogSink) -> Self {
        Self { sink: Arc::new(sink), fields: Fields::new() }
    }

    /// A logger that forwards to the global `tracing` dispatcher.
    pub fn tracing() -> Self {
        Self::new(TracingSink)
    }

    /// Returns a logger carrying one more ambient field. `self` is unchanged.
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(key.into(), value.into());
        Self { sink: Arc::clone(&self.sink), fields }
    }

    /// Returns a logger carrying all of `fields` in addition to the current ones.
    pub fn with_fields(&self, fields: Fields) -> Self {
        let mut merged = self.fields.clone();
        merged.extend(fields);
        Self { sink: Arc::clone(&self.sink), fields: merged }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Emits one entry. Keys in `fields` shadow ambient keys of the same name.
    pub fn log(&self, level: Level, fields: Fields) {
        let mut merged = self.fields.clone();
        merged.extend(fields);
        self.sink.emit(Entry { level, fields: merged });
    }

    pub fn info(&self, fields: Fields) { self.log(Level::INFO, fields) }
    pub fn warn(&self, fields: Fields) { self.log(Level::WARN, fields) }
    pub fn error(&self, fields: Fields) { self.log(Level::ERROR, fields) }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("fields", &self.fields).finish_non_exhaustive()
    }
}

// ── TracingSink ───────────────────────────────────────────────────────────────

/// Forwards each entry as one `tracing` event with target `httplog`.
///
/// `tracing` field names are fixed at compile time, so the whole mapping is
/// recorded as a single JSON `fields` value.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, entry: Entry) {
        let fields = Value::Object(entry.fields);
        // The level passed to `event!` must be a constant.
        match entry.level {
            Level::ERROR => tracing::error!(target: "httplog", fields = %fields, "request"),
            Level::WARN  => tracing::warn!(target: "httplog", fields = %fields, "request"),
            Level::INFO  => tracing::info!(target: "httplog", fields = %fields, "request"),
            Level::DEBUG => tracing::debug!(target: "httplog", fields = %fields, "request"),
            _            => tracing::trace!(target: "httplog", fields = %fields, "request"),
        }
    }
}
