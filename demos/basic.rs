//! Minimal httplog example — four routes behind the access-log middleware.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -H 'X-Request-ID: CAFE1234' http://localhost:3000/path
//!   curl http://localhost:3000/warn      # logged at WARN
//!   curl http://localhost:3000/error     # logged at ERROR
//!   curl http://localhost:3000/default   # no explicit status, logged at INFO

use http::Method;
use httplog::middleware::with_http_logging;
use httplog::{Logger, Request, ResponseWriter, Router, Server};

#[tokio::main]
async fn main() -> Result<(), httplog::Error> {
    tracing_subscriber::fmt::init();

    let log = Logger::tracing().with_field("service", "my-http-service");

    let app = Router::new()
        .with(with_http_logging(log))
        .on(Method::GET, "/path",    ok)
        .on(Method::GET, "/warn",    not_found)
        .on(Method::GET, "/error",   bad_gateway)
        .on(Method::GET, "/default", hello);

    Server::bind("0.0.0.0:3000")?.serve(app).await
}

fn ok(w: &mut dyn ResponseWriter, _req: &Request) {
    w.set_status(200);
}

fn not_found(w: &mut dyn ResponseWriter, _req: &Request) {
    w.set_status(404);
}

fn bad_gateway(w: &mut dyn ResponseWriter, _req: &Request) {
    w.set_status(502);
}

// Never sets a status: the client gets 200 and the log says 200.
fn hello(w: &mut dyn ResponseWriter, _req: &Request) {
    let _ = w.write(b"Hello Word!");
}
