use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use httptester_client::{CancelContext, HttpResponse, RequestHead};
use url::Url;

use crate::error::constructors;
use crate::sink::ErrorSink;

/// Characters of body text quoted in failure messages
const EXCERPT_CHARS: usize = 100;

/// A response read in full, with the request it answers.
pub struct TestResponse {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) url: Url,
    pub(crate) request: RequestHead,
    pub(crate) sink: ErrorSink,
}

impl TestResponse {
    /// Read `response`'s body to the end under the request's `cancel`
    /// context.
    ///
    /// The transport body is dropped on every path. A read failure,
    /// cancellation or expired deadline is reported as a body error and
    /// yields `None`.
    pub(crate) async fn read(
        response: HttpResponse,
        request: RequestHead,
        cancel: &CancelContext,
        sink: ErrorSink,
    ) -> Option<Self> {
        let (status, headers, url, body) = response.into_parts();
        match cancel.run(body.bytes()).await {
            Ok(body) => Some(Self::from_parts(status, headers, body, url, request, sink)),
            Err(e) => {
                sink.report(constructors::body(e).with_request(&request.method, &request.url));
                None
            }
        }
    }

    /// Assemble a response from parts already in memory.
    #[must_use]
    pub fn from_parts(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        request: RequestHead,
        sink: ErrorSink,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            request,
            sink,
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The buffered body
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The final URL, after any redirects were followed.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The request as it was sent.
    #[must_use]
    pub fn request(&self) -> &RequestHead {
        &self.request
    }

    /// The body decoded as UTF-8, with invalid sequences replaced.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Preview of the body for failure messages.
    pub(crate) fn excerpt(&self) -> String {
        excerpt(&self.text())
    }

    /// Report `err` tagged with this response's request.
    pub(crate) fn report(&self, err: crate::Error) {
        self.sink
            .report(err.with_request(&self.request.method, &self.request.url));
    }
}

pub(crate) fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

impl fmt::Debug for TestResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestResponse")
            .field("status", &self.status)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish_non_exhaustive()
    }
}
