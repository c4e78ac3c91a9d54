//! Request method and target
//!
//! The method is kept as given and validated at execute time, so an
//! invalid name is reported once per attempt rather than silently fixed.

use crate::builder::core::RequestBuilder;

impl RequestBuilder {
    /// Set the method and the path appended to the base URL.
    ///
    /// # Arguments
    /// * `method` - Method name, e.g. `"PATCH"`; checked when the request executes
    /// * `path` - Path concatenated verbatim onto the base URL
    ///
    /// # Examples
    /// ```no_run
    /// use httptester::{ErrorSink, HttpClient, RequestBuilder};
    ///
    /// let builder = RequestBuilder::new("http://127.0.0.1:8080", HttpClient::new(), ErrorSink::panicking())
    ///     .method("PATCH", "/users/7");
    /// assert_eq!(builder.method_name(), Some("PATCH"));
    /// ```
    #[must_use]
    pub fn method(mut self, method: impl Into<String>, path: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self.path = path.into();
        if self.debug_enabled {
            log::debug!(
                "httptester: {} {}{}",
                self.method.as_deref().unwrap_or_default(),
                self.base_url,
                self.path
            );
        }
        self
    }

    /// Shorthand for `method("GET", path)`
    #[must_use]
    pub fn get(self, path: impl Into<String>) -> Self {
        self.method("GET", path)
    }

    /// Shorthand for `method("POST", path)`
    #[must_use]
    pub fn post(self, path: impl Into<String>) -> Self {
        self.method("POST", path)
    }

    /// Shorthand for `method("PUT", path)`
    #[must_use]
    pub fn put(self, path: impl Into<String>) -> Self {
        self.method("PUT", path)
    }

    /// Shorthand for `method("DELETE", path)`
    #[must_use]
    pub fn delete(self, path: impl Into<String>) -> Self {
        self.method("DELETE", path)
    }

    /// Do not follow redirects: the first response is returned as-is.
    ///
    /// The transport's redirect policy is swapped out only while the
    /// request executes and restored afterwards, even on failure.
    #[must_use]
    pub fn no_follow(mut self) -> Self {
        self.follow_redirects = false;
        self
    }
}
