//! Middleware layer.
//!
//! Middleware turns one handler into another and is the right place for
//! cross-cutting concerns. A [`Middleware`] is any `Fn(BoxedHandler) ->
//! BoxedHandler`, or a type implementing the trait when it needs state.
//!
//! Built-in middleware:
//! - [`with_http_logging`] — one structured access-log entry per request

mod logging;
mod observer;

pub use logging::{HttpLogging, LoggingHandler, http_fields, severity, with_http_logging};
pub use observer::StatusRecorder;

use crate::handler::BoxedHandler;

/// Wraps a handler in another handler.
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, inner: BoxedHandler) -> BoxedHandler;
}

impl<F> Middleware for F
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    fn wrap(&self, inner: BoxedHandler) -> BoxedHandler {
        self(inner)
    }
}
