//! Per-suite request factory

use std::fmt;
use std::sync::Arc;

use http::{HeaderName, HeaderValue};
use httptester_client::Transport;

use crate::builder::RequestBuilder;
use crate::error::constructors;
use crate::sink::ErrorSink;

/// Creates builders that share a base URL, transport, error sink and a set
/// of default headers.
///
/// ```no_run
/// use httptester::{ErrorSink, HttpClient, HttpTester};
///
/// # async fn run() {
/// let api = HttpTester::new("http://127.0.0.1:8080", HttpClient::new(), ErrorSink::panicking())
///     .default_header("accept", "application/json");
///
/// if let Some(resp) = api.get("/users/1").execute().await {
///     resp.assert_status(&[200]);
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct HttpTester {
    base_url: String,
    transport: Arc<dyn Transport>,
    sink: ErrorSink,
    default_headers: Vec<(HeaderName, HeaderValue)>,
}

impl HttpTester {
    #[must_use]
    pub fn new(base_url: impl Into<String>, transport: impl Transport + 'static, sink: ErrorSink) -> Self {
        Self {
            base_url: base_url.into(),
            transport: Arc::new(transport),
            sink,
            default_headers: Vec::new(),
        }
    }

    /// Add a header set on every builder created afterwards. Invalid names
    /// or values are reported to the sink and skipped.
    #[must_use]
    pub fn default_header(mut self, key: &str, value: &str) -> Self {
        let name = match HeaderName::from_bytes(key.as_bytes()) {
            Ok(name) => name,
            Err(e) => {
                self.sink.report(
                    constructors::build_with(format!("invalid header name {key:?}"), e)
                        .with_target(None, &self.base_url),
                );
                return self;
            }
        };
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.default_headers.retain(|(existing, _)| *existing != name);
                self.default_headers.push((name, value));
            }
            Err(e) => self.sink.report(
                constructors::build_with(format!("invalid value for header {name}"), e)
                    .with_target(None, &self.base_url),
            ),
        }
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A fresh builder with the defaults applied and no method set.
    #[must_use]
    pub fn request(&self) -> RequestBuilder {
        let mut builder =
            RequestBuilder::with_shared(self.base_url.clone(), Arc::clone(&self.transport), self.sink.clone());
        for (name, value) in &self.default_headers {
            builder.headers.insert(name.clone(), value.clone());
        }
        builder
    }

    #[must_use]
    pub fn get(&self, path: impl Into<String>) -> RequestBuilder {
        self.request().get(path)
    }

    #[must_use]
    pub fn post(&self, path: impl Into<String>) -> RequestBuilder {
        self.request().post(path)
    }

    #[must_use]
    pub fn put(&self, path: impl Into<String>) -> RequestBuilder {
        self.request().put(path)
    }

    #[must_use]
    pub fn delete(&self, path: impl Into<String>) -> RequestBuilder {
        self.request().delete(path)
    }
}

impl fmt::Debug for HttpTester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTester")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorCollector, HttpClient};

    #[test]
    fn builders_start_with_default_headers() {
        let collector = ErrorCollector::new();
        let api = HttpTester::new("http://h", HttpClient::new(), collector.sink())
            .default_header("Accept", "application/json")
            .default_header("bad header", "x");

        let builder = api.post("/items").header("accept", "text/plain");
        assert_eq!(builder.method_name(), Some("POST"));
        assert_eq!(builder.header_map()["accept"], "text/plain");
        assert_eq!(api.request().header_map()["accept"], "application/json");
        assert_eq!(collector.len(), 1);
    }
}
