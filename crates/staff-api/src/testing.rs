//! In-process mock backend for tests.
//!
//! A `tiny_http` server on `127.0.0.1:0` that answers from registered route
//! handlers and records every request it sees. Each request is handled on its
//! own thread, so a handler may block (e.g. on a `Barrier`) to hold responses
//! back until several requests are in flight.

#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use serde_json::Value;

type Handler = Arc<dyn Fn(&RecordedRequest) -> MockResponse + Send + Sync>;
type Routes = Arc<Mutex<HashMap<(String, String), Handler>>>;

/// A request as the backend received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, as sent.
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or_default()
    }

    /// Token from an `Authorization: Bearer …` header.
    pub fn bearer(&self) -> Option<&str> {
        self.authorization.as_deref()?.strip_prefix("Bearer ")
    }

    /// Decoded value of a query parameter.
    pub fn query(&self, key: &str) -> Option<String> {
        let (_, query) = self.url.split_once('?')?;
        query.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (k == key).then(|| {
                urlencoding::decode(&v.replace('+', " "))
                    .map_or_else(|_| v.to_string(), |s| s.into_owned())
            })
        })
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// A canned reply.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn ok(body: &Value) -> Self {
        Self::json(200, body)
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn no_content() -> Self {
        Self::text(204, "")
    }
}

pub struct MockBackend {
    server: Arc<tiny_http::Server>,
    base_url: String,
    routes: Routes,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
    worker: Option<JoinHandle<()>>,
}

impl MockBackend {
    pub fn start() -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("bind mock backend"));
        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .expect("mock backend has an IP address");

        let routes: Routes = Arc::default();
        let log: Arc<Mutex<Vec<RecordedRequest>>> = Arc::default();

        let worker = {
            let server = Arc::clone(&server);
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&log);
            std::thread::spawn(move || {
                for request in server.incoming_requests() {
                    let routes = Arc::clone(&routes);
                    let log = Arc::clone(&log);
                    std::thread::spawn(move || handle(request, &routes, &log));
                }
            })
        };

        Self {
            server,
            base_url: format!("http://127.0.0.1:{port}"),
            routes,
            log,
            worker: Some(worker),
        }
    }

    /// Root URL to configure clients with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Answer `method path` (query string ignored) with `handler`.
    pub fn route(
        &self,
        method: &str,
        path: &str,
        handler: impl Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
    ) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method.to_uppercase(), path.to_string()), Arc::new(handler));
    }

    /// Answer `method path` with a fixed JSON body.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.route(method, path, move |_| MockResponse::json(status, &body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests received for `method path`, in arrival order.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method.eq_ignore_ascii_case(method) && r.path() == path)
            .collect()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests_to(method, path).len()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn handle(
    mut request: tiny_http::Request,
    routes: &Routes,
    log: &Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let header = |name: &str| {
        request
            .headers()
            .iter()
            .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
            .map(|h| h.value.to_string())
    };
    let authorization = header("Authorization");
    let content_type = header("Content-Type");

    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);

    let recorded = RecordedRequest {
        method: request.method().to_string().to_uppercase(),
        url: request.url().to_string(),
        authorization,
        content_type,
        body,
    };
    log.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(recorded.clone());

    let handler = routes
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&(recorded.method.clone(), recorded.path().to_string()))
        .cloned();
    let reply = handler.map_or_else(
        || MockResponse::text(404, r#"{"detail": "Not found."}"#),
        |h| h(&recorded),
    );

    let response = tiny_http::Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(
            tiny_http::Header::from_bytes("Content-Type", "application/json")
                .expect("static header is valid"),
        );
    let _ = request.respond(response);
}
