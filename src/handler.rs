//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! The router holds handlers of *different* types in one radix tree per
//! method, and middleware wraps one handler inside another. Both need a single
//! concrete type, so handlers are stored as **trait objects**
//! (`Arc<dyn Handler>`).
//!
//! ```text
//! fn hello(w: &mut dyn ResponseWriter, req: &Request) { … }   ← user writes this
//!        ↓ router.on(Method::GET, "/", hello)
//! hello.into_boxed_handler()                                  ← Handler blanket impl
//!        ↓  stored as BoxedHandler = Arc<dyn Handler>
//! middleware.wrap(handler)                                    ← once, on first dispatch
//!        ↓
//! handler.serve(&mut response, &req)                          ← one vtable dispatch
//! ```
//!
//! Handlers are synchronous. The server runs each request's handler chain on
//! tokio's blocking pool, so a handler may do blocking work without stalling
//! the connection tasks.

use std::sync::Arc;

use crate::request::Request;
use crate::response::ResponseWriter;

/// A heap-allocated, type-erased handler shared across concurrent requests.
pub type BoxedHandler = Arc<dyn Handler>;

/// Serves one request by writing to a [`ResponseWriter`].
///
/// Implemented automatically for any function with the signature:
///
/// ```text
/// fn name(w: &mut dyn ResponseWriter, req: &Request)
/// ```
///
/// Implement it on your own types when the handler carries state, the way
/// the logging middleware does.
pub trait Handler: Send + Sync + 'static {
    fn serve(&self, w: &mut dyn ResponseWriter, req: &Request);

    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler
    where
        Self: Sized,
    {
        Arc::new(self)
    }
}

/// `Fn(&mut dyn ResponseWriter, &Request)` covers named `fn` items and
/// closures whose parameter types are annotated.
impl<F> Handler for F
where
    F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
{
    fn serve(&self, w: &mut dyn ResponseWriter, req: &Request) {
        self(w, req)
    }
}
