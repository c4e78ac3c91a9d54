//! Core `RequestBuilder` structure and base functionality
//!
//! Holds the accumulated configuration of one request: target, method,
//! query, headers, body, hooks and the transport it will be sent through.

use std::fmt;
use std::sync::Arc;

use http::HeaderMap;
use httptester_client::multipart::Producer;
use httptester_client::{Body, CancelContext, HttpError, HttpRequest, HttpResponse, RequestHead, Transport};

use crate::builder::query::QueryParams;
use crate::sink::ErrorSink;

/// Hook run on the finalized request just before dispatch. Returns the
/// request to send, which may be a different one.
pub type BeforeHook = Box<dyn FnMut(HttpRequest) -> HttpRequest + Send + 'static>;

/// Hook run after dispatch with exactly one of the response or the
/// transport error present.
pub type AfterHook =
    Box<dyn FnMut(&RequestHead, Option<&HttpResponse>, Option<&HttpError>) + Send + 'static>;

/// Content types the builder sets on encoded bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// application/json content type
    ApplicationJson,
    /// application/xml content type
    ApplicationXml,
    /// application/x-www-form-urlencoded content type
    ApplicationFormUrlEncoded,
    /// application/octet-stream content type
    ApplicationOctetStream,
}

impl ContentType {
    /// Convert content type to string representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::ApplicationJson => "application/json",
            ContentType::ApplicationXml => "application/xml",
            ContentType::ApplicationFormUrlEncoded => "application/x-www-form-urlencoded",
            ContentType::ApplicationOctetStream => "application/octet-stream",
        }
    }
}

/// Fluent builder for a single test request
///
/// Every configuration method consumes and returns the builder. Failures
/// while configuring are reported to the [`ErrorSink`] and never returned.
/// A builder may be executed more than once; in-memory bodies are resent
/// each time while streaming bodies are consumed by the first execute.
pub struct RequestBuilder {
    /// Transport the request is dispatched through
    pub(crate) transport: Arc<dyn Transport>,
    /// Receiver of every failure
    pub(crate) sink: ErrorSink,
    pub(crate) base_url: String,
    pub(crate) path: String,
    /// Method name, validated at execute time
    pub(crate) method: Option<String>,
    pub(crate) query: QueryParams,
    pub(crate) headers: HeaderMap,
    /// When false, redirects are suppressed for the duration of execute
    pub(crate) follow_redirects: bool,
    pub(crate) body: Option<Body>,
    /// Producer of a pending multipart body, started at execute
    pub(crate) upload: Option<Producer>,
    pub(crate) before: Option<BeforeHook>,
    pub(crate) after: Option<AfterHook>,
    pub(crate) cancel: Option<CancelContext>,
    /// Debug logging enabled flag
    pub(crate) debug_enabled: bool,
}

impl RequestBuilder {
    /// Start building a request against `base_url`.
    ///
    /// # Examples
    /// ```no_run
    /// use httptester::{ErrorSink, HttpClient, RequestBuilder};
    ///
    /// # async fn run() {
    /// let mut builder = RequestBuilder::new("http://127.0.0.1:8080", HttpClient::new(), ErrorSink::panicking())
    ///     .get("/health");
    /// if let Some(resp) = builder.execute().await {
    ///     resp.assert_status(&[200]).assert_contains("ok");
    /// }
    /// # }
    /// ```
    #[must_use]
    pub fn new(base_url: impl Into<String>, transport: impl Transport + 'static, sink: ErrorSink) -> Self {
        Self::with_shared(base_url, Arc::new(transport), sink)
    }

    /// Start building a request on a transport shared with other builders.
    #[must_use]
    pub fn with_shared(base_url: impl Into<String>, transport: Arc<dyn Transport>, sink: ErrorSink) -> Self {
        Self {
            transport,
            sink,
            base_url: base_url.into(),
            path: String::new(),
            method: None,
            query: QueryParams::default(),
            headers: HeaderMap::new(),
            follow_redirects: true,
            body: None,
            upload: None,
            before: None,
            after: None,
            cancel: None,
            debug_enabled: false,
        }
    }

    /// Enable debug logging of configuration and dispatch
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// Replace the error sink.
    #[must_use]
    pub fn on_error(mut self, sink: ErrorSink) -> Self {
        self.sink = sink;
        self
    }

    /// Run the request under `ctx`. Cancelling the context aborts an
    /// in-flight dispatch with a canceled transport error.
    #[must_use]
    pub fn cancel_context(mut self, ctx: CancelContext) -> Self {
        self.cancel = Some(ctx);
        self
    }

    /// Current accumulated query parameters
    #[must_use]
    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    /// Current accumulated headers
    #[must_use]
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    /// Method as configured, not yet validated
    #[must_use]
    pub fn method_name(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Path appended to the base URL
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// False once [`no_follow`](RequestBuilder::no_follow) was called
    #[must_use]
    pub fn follows_redirects(&self) -> bool {
        self.follow_redirects
    }

    /// Report `err`, tagged with the method and target configured so far
    /// unless it already names its request.
    pub(crate) fn report(&self, err: crate::Error) {
        let err = if err.has_request() {
            err
        } else {
            let target = format!("{}{}", self.base_url, self.path);
            err.with_target(self.method.as_deref(), &target)
        };
        self.sink.report(err);
    }
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("base_url", &self.base_url)
            .field("path", &self.path)
            .field("method", &self.method)
            .field("query", &self.query)
            .field("headers", &self.headers)
            .field("follow_redirects", &self.follow_redirects)
            .field("body", &self.body)
            .field("upload_pending", &self.upload.is_some())
            .field("debug_enabled", &self.debug_enabled)
            .finish_non_exhaustive()
    }
}
