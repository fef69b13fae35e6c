//! Incoming HTTP request type.

use std::borrow::Cow;
use std::collections::HashMap;

use bytes::Bytes;
use http::header::{HOST, REFERER, USER_AGENT};
use http::request::Parts;
use http::{HeaderMap, Method, Version};

/// An incoming HTTP request with its body fully buffered.
///
/// Read-only from a handler's point of view. Built by the server from the
/// hyper request, or by hand in tests via `From<http::Request<Bytes>>`.
pub struct Request {
    pub(crate) parts: Parts,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub fn from_parts(parts: Parts, body: Bytes) -> Self {
        Self { parts, body, params: HashMap::new() }
    }

    pub fn method(&self) -> &Method { &self.parts.method }
    pub fn headers(&self) -> &HeaderMap { &self.parts.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// The URL path, without the query string.
    pub fn path(&self) -> &str { self.parts.uri.path() }

    pub fn query(&self) -> Option<&str> { self.parts.uri.query() }

    /// The host the request was addressed to.
    ///
    /// The authority of an absolute-form request target (or HTTP/2
    /// `:authority`) takes precedence over the `Host` header. Userinfo is
    /// never part of the result; the port is kept. Empty when neither is
    /// present.
    pub fn host(&self) -> Cow<'_, str> {
        match self.parts.uri.authority() {
            Some(authority) => {
                let authority = authority.as_str();
                Cow::Borrowed(authority.rsplit_once('@').map_or(authority, |(_, host)| host))
            }
            None => self.header(HOST.as_str()).unwrap_or_default(),
        }
    }

    /// Case-insensitive header lookup. Returns the first value only.
    ///
    /// Bytes that are not valid UTF-8 are replaced with `U+FFFD`.
    pub fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.parts.headers.get(name).map(|v| String::from_utf8_lossy(v.as_bytes()))
    }

    pub fn referer(&self) -> Cow<'_, str> { self.header(REFERER.as_str()).unwrap_or_default() }
    pub fn user_agent(&self) -> Cow<'_, str> { self.header(USER_AGENT.as_str()).unwrap_or_default() }

    /// Protocol version as `(major, minor)`, e.g. `(1, 1)` for HTTP/1.1.
    pub fn version(&self) -> (u8, u8) {
        let v = self.parts.version;
        if v == Version::HTTP_09 {
            (0, 9)
        } else if v == Version::HTTP_10 {
            (1, 0)
        } else if v == Version::HTTP_2 {
            (2, 0)
        } else if v == Version::HTTP_3 {
            (3, 0)
        } else {
            (1, 1)
        }
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        Self::from_parts(parts, body)
    }
}
