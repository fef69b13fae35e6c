//! Pass-through response writer that remembers the status code.

use std::io;

use http::HeaderMap;

use crate::response::ResponseWriter;

/// Wraps the real [`ResponseWriter`] for one request and records the last
/// status code set through it.
///
/// Every call is forwarded unchanged. The recorded status starts at `200`
/// and is overwritten on *every* `set_status`, even when the wrapped writer
/// ignores the repeat call, so it can differ from what the client receives.
pub struct StatusRecorder<'a> {
    inner: &'a mut dyn ResponseWriter,
    status: u16,
}

impl<'a> StatusRecorder<'a> {
    pub fn new(inner: &'a mut dyn ResponseWriter) -> Self {
        Self { inner, status: 200 }
    }

    pub fn status(&self) -> u16 {
        self.status
    }
}

impl ResponseWriter for StatusRecorder<'_> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn set_status(&mut self, code: u16) {
        self.status = code;
        self.inner.set_status(code);
    }
}
