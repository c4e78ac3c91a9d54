//! Shared loopback server and transport mocks

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Json;
use axum::extract::Query;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{any, get, post};
use axum::Router;
use httptester::client::error as client_error;
use httptester::{Body, HttpError, HttpRequest, HttpResponse, Policy, Transport};
use futures::stream;
use serde_json::{Value, json};

pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Start the test application on an ephemeral port and return its base URL.
pub async fn serve() -> String {
    let app = Router::new()
        .route("/", get(|| async { (StatusCode::CONFLICT, "Already exists\n") }))
        .route("/x", post(echo))
        .route("/inspect", any(inspect))
        .route("/found", get(|| async { Redirect::temporary("/target") }))
        .route("/moved", any(|| async { (StatusCode::FOUND, [(header::LOCATION, "/inspect")]) }))
        .route("/target", get(|| async { "arrived" }))
        .route(
            "/hop",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Redirect::temporary(params.get("to").map_or("/target", String::as_str))
            }),
        )
        .route("/drip", get(drip))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "too late"
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{addr}")
}

/// Return the request body with the request's Content-Type.
async fn echo(headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or(header::HeaderValue::from_static("application/octet-stream"));
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

/// Send the headers and a first chunk at once, then stall between chunks.
async fn drip() -> axum::body::Body {
    let chunks = stream::unfold(0u8, |sent| async move {
        if sent > 0 {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        (sent < 3).then(|| (Ok::<_, std::io::Error>(Bytes::from_static(b"drip ")), sent + 1))
    });
    axum::body::Body::from_stream(chunks)
}

/// Describe the request as JSON.
async fn inspect(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(json!({
        "method": method.as_str(),
        "query": uri.query().unwrap_or_default(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

/// What a [`RecordingTransport`] saw for one dispatch.
#[derive(Debug, Clone)]
pub struct Dispatched {
    pub method: String,
    pub url: String,
    pub body: Vec<u8>,
    pub redirects_suppressed: bool,
}

/// In-memory transport that reads the request body fully and answers 200
/// with an empty JSON object, or fails every dispatch when `fail` is set.
pub struct RecordingTransport {
    policy: Mutex<Policy>,
    pub dispatched: Mutex<Vec<Dispatched>>,
    fail: bool,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            policy: Mutex::new(Policy::limited(5)),
            dispatched: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            policy: Mutex::new(Policy::limited(5)),
            dispatched: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn last(&self) -> Dispatched {
        self.dispatched
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("at least one dispatch")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let redirects_suppressed = self.redirect_policy().is_none();
        let (head, body, _cancel) = request.into_parts();
        let body = match body {
            Some(body) => body.bytes().await?,
            None => Bytes::new(),
        };

        self.dispatched.lock().unwrap().push(Dispatched {
            method: head.method.to_string(),
            url: head.url.to_string(),
            body: body.to_vec(),
            redirects_suppressed,
        });

        if self.fail {
            return Err(client_error::request(std::io::Error::other("connection reset")).with_url(head.url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));
        Ok(HttpResponse::new(StatusCode::OK, headers, head.url, Body::from("{}")))
    }

    fn redirect_policy(&self) -> Policy {
        self.policy.lock().unwrap().clone()
    }

    fn set_redirect_policy(&self, policy: Policy) {
        *self.policy.lock().unwrap() = policy;
    }
}
