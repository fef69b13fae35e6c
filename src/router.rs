//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Middleware registered
//! with [`Router::with`] wraps every route handler and the not-found
//! fallback. The wrapped handlers are built once, on the first dispatch.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware::Middleware;
use crate::request::Request;
use crate::response::ResponseWriter;

// Slot of the not-found handler in `handlers`.
const NOT_FOUND: usize = 0;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve)
/// or drive it directly with [`Router::dispatch`]. Every builder method
/// returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<usize>>,
    handlers: Vec<BoxedHandler>,
    middleware: Vec<Arc<dyn Middleware>>,
    // `handlers` with the middleware applied, same indices.
    wrapped: OnceLock<Vec<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            handlers: vec![not_found.into_boxed_handler()],
            middleware: Vec::new(),
            wrapped: OnceLock::new(),
        }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route pattern or conflicts with one
    /// already registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        let slot = self.handlers.len();
        self.routes
            .entry(method)
            .or_default()
            .insert(path, slot)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self.handlers.push(handler.into_boxed_handler());
        self.wrapped = OnceLock::new();
        self
    }

    /// Add a middleware. The first one added is the outermost.
    pub fn with(mut self, middleware: impl Middleware) -> Self {
        self.middleware.push(Arc::new(middleware));
        self.wrapped = OnceLock::new();
        self
    }

    /// Replace the handler used when no route matches (default: bare 404).
    pub fn not_found(mut self, handler: impl Handler) -> Self {
        self.handlers[NOT_FOUND] = handler.into_boxed_handler();
        self.wrapped = OnceLock::new();
        self
    }

    /// Route `req` and serve it through the middleware chain.
    pub fn dispatch(&self, w: &mut dyn ResponseWriter, mut req: Request) {
        let slot = match self.lookup(req.method(), req.path()) {
            Some((slot, params)) => {
                req.params = params;
                slot
            }
            None => NOT_FOUND,
        };

        let wrapped = self.wrapped.get_or_init(|| self.wrap_all());
        wrapped[slot].serve(w, &req);
    }

    fn wrap_all(&self) -> Vec<BoxedHandler> {
        self.handlers
            .iter()
            .map(|handler| {
                self.middleware
                    .iter()
                    .rev()
                    .fold(Arc::clone(handler), |inner, mw| mw.wrap(inner))
            })
            .collect()
    }

    fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(usize, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((*matched.value, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

fn not_found(w: &mut dyn ResponseWriter, _req: &Request) {
    w.set_status(404);
}
