//! Authentication headers

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::builder::core::RequestBuilder;

impl RequestBuilder {
    /// Set the `Authorization` header verbatim.
    #[must_use]
    pub fn auth(self, value: impl AsRef<str>) -> Self {
        self.header(http::header::AUTHORIZATION.as_str(), value)
    }

    /// Set `Authorization: Bearer <token>`.
    ///
    /// # Examples
    /// ```no_run
    /// use httptester::{ErrorSink, HttpClient, RequestBuilder};
    ///
    /// let builder = RequestBuilder::new("http://127.0.0.1:8080", HttpClient::new(), ErrorSink::panicking())
    ///     .bearer("s3cret");
    /// assert_eq!(builder.header_map()["authorization"], "Bearer s3cret");
    /// ```
    #[must_use]
    pub fn bearer(self, token: impl AsRef<str>) -> Self {
        self.auth(format!("Bearer {}", token.as_ref()))
    }

    /// Set basic authentication from a username and password. The
    /// credentials are base64 encoded as `user:pass`.
    #[must_use]
    pub fn basic_auth(self, user: impl AsRef<str>, pass: impl AsRef<str>) -> Self {
        let encoded = STANDARD.encode(format!("{}:{}", user.as_ref(), pass.as_ref()));
        self.auth(format!("Basic {encoded}"))
    }
}
