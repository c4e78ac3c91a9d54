//! HTTP response type returned by a transport

use http::{HeaderMap, StatusCode, Version};
use url::Url;

use crate::http::body::Body;

/// A response whose body has not been read yet.
#[derive(Debug)]
pub struct HttpResponse {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    url: Url,
    body: Body,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, url: Url, body: Body) -> Self {
        Self {
            status,
            version: Version::HTTP_11,
            headers,
            url,
            body,
        }
    }

    pub(crate) fn from_hyper(response: http::Response<hyper::body::Incoming>, url: Url) -> Self {
        let (parts, incoming) = response.into_parts();
        Self {
            status: parts.status,
            version: parts.version,
            headers: parts.headers,
            url,
            body: Body::from_incoming(incoming),
        }
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    #[inline]
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The URL that produced this response, after any redirects.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Split off the unread body.
    #[must_use]
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Url, Body) {
        (self.status, self.headers, self.url, self.body)
    }

    /// Read the whole body. The underlying connection handle is released
    /// when this returns, whether or not the read succeeded.
    ///
    /// # Errors
    ///
    /// Returns a body error if the body stream fails part way.
    pub async fn bytes(self) -> crate::Result<bytes::Bytes> {
        self.body.bytes().await
    }
}
