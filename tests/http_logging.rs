use bytes::Bytes;
use http::Method;
use httplog::middleware::with_http_logging;
use httplog::testing::null_logger;
use httplog::{BufferedResponse, Request, ResponseWriter, Router};
use serde_json::{Value, json};
use tracing::Level;

fn ok(w: &mut dyn ResponseWriter, _: &Request) {
    w.set_status(200);
}

fn warn(w: &mut dyn ResponseWriter, _: &Request) {
    w.set_status(404);
}

fn error(w: &mut dyn ResponseWriter, _: &Request) {
    w.set_status(502);
}

fn default(w: &mut dyn ResponseWriter, _: &Request) {
    let _ = w.write(b"Hello Word!");
}

fn late_error(w: &mut dyn ResponseWriter, _: &Request) {
    let _ = w.write(b"partial");
    w.set_status(500);
}

fn get(uri: &str) -> http::request::Builder {
    http::Request::builder().method(Method::GET).uri(uri)
}

#[test]
fn log_fields() {
    let (log, hook) = null_logger();
    let app = Router::new()
        .with(with_http_logging(log.with_field("service", "my-http-service")))
        .on(Method::GET, "/path", ok);

    let req = get("http://example.com/path")
        .header("User-Agent", "golang-test")
        .header("Referer", "http://example.com/referrer")
        .header("X-Request-ID", "CAFE1234")
        .body(Bytes::new())
        .unwrap();
    let mut res = BufferedResponse::new();
    app.dispatch(&mut res, Request::from(req));

    let expected = json!({
        "http": {
            "ident": "example.com",
            "method": "GET",
            "referer": "http://example.com/referrer",
            "request_id": "CAFE1234",
            "status_code": 200,
            "url": "/path",
            "useragent": "golang-test",
            "version": "1.1",
        },
        "service": "my-http-service",
    });
    assert_eq!(hook.len(), 1);
    let entry = hook.last_entry().unwrap();
    assert_eq!(entry.level, Level::INFO);
    assert_eq!(Value::Object(entry.fields), expected);
}

#[test]
fn log_level() {
    let (log, hook) = null_logger();
    let app = Router::new()
        .with(with_http_logging(log.with_field("service", "my-http-service")))
        .on(Method::GET, "/ok", ok)
        .on(Method::GET, "/warn", warn)
        .on(Method::GET, "/error", error)
        .on(Method::GET, "/default", default);

    let cases = [
        ("/ok", Level::INFO, 200),
        ("/warn", Level::WARN, 404),
        ("/error", Level::ERROR, 502),
        ("/default", Level::INFO, 200),
    ];

    for (path, level, status) in cases {
        let mut res = BufferedResponse::new();
        let req = get(&format!("http://example.com{path}")).body(Bytes::new()).unwrap();
        app.dispatch(&mut res, Request::from(req));

        assert_eq!(hook.len(), 1, "{path}");
        let entry = hook.last_entry().unwrap();
        assert_eq!(entry.level, level, "{path}");
        assert_eq!(entry.fields["http"]["status_code"], status, "{path}");
        assert_eq!(res.status(), status, "{path}");
        hook.reset();
    }
}

#[test]
fn default_status_keeps_the_body() {
    let (log, hook) = null_logger();
    let app = Router::new()
        .with(with_http_logging(log))
        .on(Method::GET, "/default", default);

    let mut res = BufferedResponse::new();
    app.dispatch(&mut res, Request::from(get("/default").body(Bytes::new()).unwrap()));

    assert_eq!(res.status(), 200);
    assert_eq!(res.body(), b"Hello Word!");
    assert_eq!(hook.last_entry().unwrap().fields["http"]["status_code"], 200);
}

#[test]
fn url_never_has_a_query_string() {
    let (log, hook) = null_logger();
    let app = Router::new().with(with_http_logging(log)).on(Method::GET, "/path", ok);

    let req = get("http://example.com/path?session=abc&debug=1").body(Bytes::new()).unwrap();
    app.dispatch(&mut BufferedResponse::new(), Request::from(req));

    assert_eq!(hook.last_entry().unwrap().fields["http"]["url"], "/path");
}

#[test]
fn version_follows_the_protocol() {
    let (log, hook) = null_logger();
    let app = Router::new().with(with_http_logging(log)).on(Method::GET, "/path", ok);

    for (version, rendered) in [
        (http::Version::HTTP_10, "1.0"),
        (http::Version::HTTP_11, "1.1"),
        (http::Version::HTTP_2, "2.0"),
    ] {
        let req = get("/path").version(version).body(Bytes::new()).unwrap();
        app.dispatch(&mut BufferedResponse::new(), Request::from(req));
        assert_eq!(hook.last_entry().unwrap().fields["http"]["version"], rendered);
    }
}

#[test]
fn unmatched_requests_are_logged_too() {
    let (log, hook) = null_logger();
    let app = Router::new().with(with_http_logging(log)).on(Method::GET, "/path", ok);

    let mut res = BufferedResponse::new();
    app.dispatch(&mut res, Request::from(get("/nowhere").body(Bytes::new()).unwrap()));

    assert_eq!(res.status(), 404);
    assert_eq!(hook.len(), 1);
    let entry = hook.last_entry().unwrap();
    assert_eq!(entry.level, Level::WARN);
    assert_eq!(entry.fields["http"]["url"], "/nowhere");
}

// The client still gets the 200 fixed by the first write; the log keeps the
// last status the handler asked for.
#[test]
fn logged_status_is_the_last_one_set() {
    let (log, hook) = null_logger();
    let app = Router::new().with(with_http_logging(log)).on(Method::GET, "/late", late_error);

    let mut res = BufferedResponse::new();
    app.dispatch(&mut res, Request::from(get("/late").body(Bytes::new()).unwrap()));

    assert_eq!(res.status(), 200);
    let entry = hook.last_entry().unwrap();
    assert_eq!(entry.level, Level::ERROR);
    assert_eq!(entry.fields["http"]["status_code"], 500);
}

#[test]
fn panicking_handler_is_not_logged() {
    fn boom(_: &mut dyn ResponseWriter, _: &Request) {
        panic!("handler exploded");
    }

    let (log, hook) = null_logger();
    let app = Router::new().with(with_http_logging(log)).on(Method::GET, "/boom", boom);

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        app.dispatch(&mut BufferedResponse::new(), Request::from(get("/boom").body(Bytes::new()).unwrap()));
    }));

    assert!(outcome.is_err());
    assert!(hook.is_empty());
}

#[test]
fn concurrent_requests_each_log_once() {
    let (log, hook) = null_logger();
    let app = Router::new().with(with_http_logging(log)).on(Method::GET, "/ok", ok);

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..25 {
                    let req = get("/ok").body(Bytes::new()).unwrap();
                    app.dispatch(&mut BufferedResponse::new(), Request::from(req));
                }
            });
        }
    });

    assert_eq!(hook.len(), 200);
    assert!(hook.entries().iter().all(|e| e.level == Level::INFO));
}
