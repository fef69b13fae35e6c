//! # httplog
//!
//! Request-logging middleware. Wrap a handler and every request it serves
//! produces exactly one structured log entry, written after the handler
//! returns, at a level derived from the response status.
//!
//! ## The contract
//!
//! - The response is untouched. A pass-through writer records the status
//!   the handler sets and forwards everything else.
//! - One entry per request: `INFO` below 400, `WARN` for 4xx, `ERROR`
//!   from 500.
//! - Fields are fixed and nested under `http`, next to whatever ambient
//!   fields the [`Logger`] already carries.
//! - No sampling, batching, request-id generation or metrics. Where the entry
//!   ends up is the [`LogSink`]'s business.
//!
//! The router and server in this crate are a thin host for handlers written
//! against [`ResponseWriter`]: hyper underneath, tokio for I/O, graceful
//! shutdown on SIGTERM / Ctrl-C.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use http::Method;
//! use httplog::middleware::with_http_logging;
//! use httplog::{Logger, Request, ResponseWriter, Router, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), httplog::Error> {
//!     let log = Logger::tracing().with_field("service", "users");
//!
//!     let app = Router::new()
//!         .with(with_http_logging(log))
//!         .on(Method::GET, "/users/{id}", get_user);
//!
//!     Server::bind("0.0.0.0:3000")?.serve(app).await
//! }
//!
//! fn get_user(w: &mut dyn ResponseWriter, req: &Request) {
//!     match req.param("id") {
//!         Some(id) => { let _ = w.write(format!(r#"{{"id":"{id}"}}"#).as_bytes()); }
//!         None => w.set_status(404),
//!     }
//! }
//! ```

mod error;
mod handler;
mod logger;
mod request;
mod response;
mod router;
mod server;

pub mod middleware;
pub mod testing;

pub use error::Error;
pub use handler::{BoxedHandler, Handler};
pub use logger::{Entry, Fields, LogSink, Logger, TracingSink};
pub use request::Request;
pub use response::{BufferedResponse, ResponseWriter};
pub use router::Router;
pub use server::Server;
