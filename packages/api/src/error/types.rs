use std::error::Error as StdError;
use std::fmt;

use http::Method;

/// A Result alias where the Err case is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A failure reported to an [`ErrorSink`](crate::ErrorSink).
///
/// Errors raised after a request was finalized carry the request's method
/// and URL, and render as `"<METHOD> <URL>: <message>"`.
pub struct Error {
    pub(crate) inner: Box<Inner>,
}

pub(crate) struct Inner {
    pub(crate) kind: Kind,
    pub(crate) message: Option<String>,
    pub(crate) source: Option<Box<dyn StdError + Send + Sync>>,
    pub(crate) request: Option<RequestContext>,
}

#[derive(Debug, Clone)]
pub(crate) struct RequestContext {
    /// Absent when no method was configured yet
    pub(crate) method: Option<String>,
    pub(crate) url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Base URL plus path did not parse
    Url,
    /// The request could not be assembled: missing or invalid method, bad header
    Build,
    /// A request body could not be serialized
    Encode,
    /// The transport failed to produce a response
    Transport,
    /// The response body could not be read in full
    Body,
    /// The response status was not one of the expected codes
    Status,
    /// The response Content-Type did not match the decoder
    ContentType,
    /// The response body did not deserialize
    Decode,
    /// A body or header assertion did not hold
    Assertion,
}

impl Kind {
    fn describe(self) -> &'static str {
        match self {
            Kind::Url => "invalid URL",
            Kind::Build => "invalid request",
            Kind::Encode => "error encoding request body",
            Kind::Transport => "transport error",
            Kind::Body => "error reading response body",
            Kind::Status => "unexpected status",
            Kind::ContentType => "unexpected Content-Type",
            Kind::Decode => "error decoding response body",
            Kind::Assertion => "assertion failed",
        }
    }
}

impl Error {
    pub(crate) fn new(kind: Kind) -> Self {
        Error {
            inner: Box::new(Inner {
                kind,
                message: None,
                source: None,
                request: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub(crate) fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Self {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub(crate) fn with_message(mut self, message: impl Into<String>) -> Self {
        self.inner.message = Some(message.into());
        self
    }

    /// Attach the method and URL of the request this error belongs to.
    #[must_use]
    pub fn with_request(self, method: &Method, url: &url::Url) -> Self {
        self.with_target(Some(method.as_str()), url.as_str())
    }

    /// Attach request context from configuration that may not have been
    /// validated yet.
    #[must_use]
    pub(crate) fn with_target(mut self, method: Option<&str>, url: &str) -> Self {
        self.inner.request = Some(RequestContext {
            method: method.map(str::to_owned),
            url: url.to_owned(),
        });
        self
    }

    pub(crate) fn has_request(&self) -> bool {
        self.inner.request.is_some()
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Method of the request this error belongs to, if known.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.inner.request.as_ref().and_then(|ctx| ctx.method.as_deref())
    }

    /// URL of the request this error belongs to, if known.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.inner.request.as_ref().map(|ctx| ctx.url.as_str())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("httptester::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref request) = self.inner.request {
            if let Some(ref method) = request.method {
                f.field("method", method);
            }
            f.field("url", &request.url);
        }

        if let Some(ref message) = self.inner.message {
            f.field("message", message);
        }

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(request) = &self.inner.request {
            match &request.method {
                Some(method) => write!(f, "{method} {}: ", request.url)?,
                None => write!(f, "{}: ", request.url)?,
            }
        }

        match &self.inner.message {
            Some(message) => f.write_str(message)?,
            None => f.write_str(self.inner.kind.describe())?,
        }

        if let Some(source) = &self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
