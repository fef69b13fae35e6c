//! Log capture for tests.
//!
//! ```rust
//! use httplog::testing::null_logger;
//!
//! let (log, hook) = null_logger();
//! log.with_field("service", "svc").info(Default::default());
//! assert_eq!(hook.len(), 1);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::logger::{Entry, LogSink, Logger};

/// A [`LogSink`] that keeps every entry in memory and prints nothing.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Entry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries recorded so far, oldest first.
    pub fn entries(&self) -> Vec<Entry> {
        self.lock().clone()
    }

    pub fn last_entry(&self) -> Option<Entry> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forgets every recorded entry.
    pub fn reset(&self) {
        self.lock().clear();
    }

    // A panicking test thread must not hide the entries from the next assertion.
    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for MemorySink {
    fn emit(&self, entry: Entry) {
        self.lock().push(entry);
    }
}

/// A logger whose entries land in the returned [`MemorySink`].
pub fn null_logger() -> (Logger, Arc<MemorySink>) {
    let hook = Arc::new(MemorySink::new());
    (Logger::new(Arc::clone(&hook)), hook)
}
