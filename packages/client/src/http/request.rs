//! HTTP request types
//!
//! [`RequestHead`] is the cloneable description of a request (everything
//! but the body). [`HttpRequest`] pairs a head with its body and the
//! cancellation context the transport must honour.

use http::{HeaderMap, Method};
use url::Url;

use crate::cancel::CancelContext;
use crate::http::body::Body;

/// Method, URL and headers of a request.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Overrides the `Host` the transport would derive from `url`.
    pub host: Option<String>,
}

impl RequestHead {
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            host: None,
        }
    }
}

/// A finalized request ready for dispatch.
#[derive(Debug)]
pub struct HttpRequest {
    head: RequestHead,
    body: Option<Body>,
    cancel: CancelContext,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            head: RequestHead::new(method, url),
            body: None,
            cancel: CancelContext::background(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Option<Body>) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelContext) -> Self {
        self.cancel = cancel;
        self
    }

    #[inline]
    #[must_use]
    pub fn head(&self) -> &RequestHead {
        &self.head
    }

    #[inline]
    pub fn head_mut(&mut self) -> &mut RequestHead {
        &mut self.head
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.head.method
    }

    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.head.url
    }

    #[inline]
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }

    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.head.headers
    }

    #[inline]
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.head.host.as_deref()
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.head.host = Some(host.into());
    }

    #[inline]
    #[must_use]
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, body: Option<Body>) {
        self.body = body;
    }

    #[inline]
    #[must_use]
    pub fn cancel_context(&self) -> &CancelContext {
        &self.cancel
    }

    /// Split into head, body and cancellation context.
    #[must_use]
    pub fn into_parts(self) -> (RequestHead, Option<Body>, CancelContext) {
        (self.head, self.body, self.cancel)
    }
}
