//! The response sink handlers write through, and the buffered sink the
//! server hands them.
//!
//! Handlers never build a response value. They receive a
//! `&mut dyn ResponseWriter`, set headers, set a status and write body bytes,
//! the same shape as Go's `http.ResponseWriter`. That shape is what lets a
//! middleware slip a pass-through wrapper between the handler and the real
//! sink without the handler noticing.

use std::io;

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, StatusCode};
use http_body_util::Full;
use tracing::{debug, warn};

// ── ResponseWriter ────────────────────────────────────────────────────────────

/// The response-writing capability handed to every [`Handler`](crate::Handler).
///
/// Object safe: handlers take `&mut dyn ResponseWriter`, so any wrapper that
/// implements this trait can be substituted for the real sink.
pub trait ResponseWriter {
    /// Response headers. Changes after the status is fixed have no effect on
    /// what the client receives.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Appends body bytes, returning how many were accepted.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Sets the response status code.
    fn set_status(&mut self, code: u16);
}

// ── BufferedResponse ──────────────────────────────────────────────────────────

/// A [`ResponseWriter`] that buffers the whole response in memory.
///
/// The server runs every handler against one of these and converts it into a
/// hyper response afterwards. Tests use it as a recorder.
///
/// Status semantics follow the usual HTTP server rule: the first
/// [`set_status`](ResponseWriter::set_status) call wins, and the first
/// [`write`](ResponseWriter::write) fixes the status at `200` if none was set.
/// Later status changes are dropped.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<u16>,
    headers: HeaderMap,
    body: BytesMut,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// The status the client will receive. `200` until one is fixed.
    pub fn status(&self) -> u16 {
        self.status.unwrap_or(200)
    }

    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Converts into the response type hyper serves.
    ///
    /// Status codes hyper cannot represent (outside `100..=999`) are sent as
    /// `500 Internal Server Error`.
    pub fn into_response(self) -> http::Response<Full<Bytes>> {
        let code = self.status();
        let status = StatusCode::from_u16(code).unwrap_or_else(|_| {
            warn!(status = code, "handler set an invalid status code, sending 500");
            StatusCode::INTERNAL_SERVER_ERROR
        });

        let mut response = http::Response::new(Full::new(self.body.freeze()));
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseWriter for BufferedResponse {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.status.get_or_insert(200);
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn set_status(&mut self, code: u16) {
        match self.status {
            None => self.status = Some(code),
            Some(sent) => debug!(sent, ignored = code, "superfluous set_status call"),
        }
    }
}

// ── Shortcuts ─────────────────────────────────────────────────────────────────

/// A status-only response: used by the server when no handler ran.
pub(crate) fn status_only(status: StatusCode) -> http::Response<Full<Bytes>> {
    let mut response = http::Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_200_with_an_empty_body() {
        let res = BufferedResponse::new();
        assert_eq!(res.status(), 200);
        assert!(res.body().is_empty());
    }

    #[test]
    fn first_status_wins() {
        let mut res = BufferedResponse::new();
        res.set_status(404);
        res.set_status(500);
        assert_eq!(res.status(), 404);
    }

    #[test]
    fn write_fixes_the_status_at_200() {
        let mut res = BufferedResponse::new();
        assert_eq!(res.write(b"Hello Word!").unwrap(), 11);
        res.set_status(502);
        assert_eq!(res.status(), 200);
        assert_eq!(res.body(), b"Hello Word!");
    }

    #[test]
    fn into_response_carries_status_headers_and_body() {
        let mut res = BufferedResponse::new();
        res.headers_mut()
            .insert(http::header::CONTENT_TYPE, "text/plain".parse().unwrap());
        res.set_status(201);
        res.write(b"created").unwrap();

        let response = res.into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[http::header::CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn unrepresentable_status_becomes_500() {
        let mut res = BufferedResponse::new();
        res.set_status(42);
        assert_eq!(res.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
