//! Header management
//!
//! Header names are case-insensitive; setting a header replaces every
//! earlier value for that name.

use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue};

use crate::builder::core::{ContentType, RequestBuilder};
use crate::error::constructors;

impl RequestBuilder {
    /// Set a header, replacing existing values.
    ///
    /// Setting `Host` overrides the host sent on the wire without changing
    /// which address is connected to. Invalid names or values are reported
    /// and the header is skipped.
    ///
    /// # Examples
    /// ```no_run
    /// use httptester::{ErrorSink, HttpClient, RequestBuilder};
    ///
    /// let builder = RequestBuilder::new("http://127.0.0.1:8080", HttpClient::new(), ErrorSink::panicking())
    ///     .header("X-Trace", "1")
    ///     .header("x-trace", "2");
    /// assert_eq!(builder.header_map()["x-trace"], "2");
    /// ```
    #[must_use]
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let key = key.as_ref();
        let name = match HeaderName::from_bytes(key.as_bytes()) {
            Ok(name) => name,
            Err(e) => {
                self.report(constructors::build_with(format!("invalid header name {key:?}"), e));
                return self;
            }
        };
        match HeaderValue::from_str(value.as_ref()) {
            Ok(value) => {
                if self.debug_enabled {
                    log::debug!("httptester: header {name}: {value:?}");
                }
                self.headers.insert(name, value);
            }
            Err(e) => self.report(constructors::build_with(
                format!("invalid value for header {name}"),
                e,
            )),
        }
        self
    }

    /// Set several headers, each replacing existing values.
    #[must_use]
    pub fn headers<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        pairs
            .into_iter()
            .fold(self, |builder, (key, value)| builder.header(key, value))
    }

    pub(crate) fn set_content_type(&mut self, content_type: ContentType) {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use crate::{ErrorCollector, HttpClient, RequestBuilder};

    #[test]
    fn header_names_are_case_insensitive_and_last_wins() {
        let b = RequestBuilder::new("http://h", HttpClient::new(), ErrorCollector::new().sink())
            .headers([("X-Api", "1"), ("x-api", "2")]);
        assert_eq!(b.header_map().get_all("x-api").iter().count(), 1);
        assert_eq!(b.header_map()["X-API"], "2");
    }

    #[test]
    fn invalid_header_is_reported_and_skipped() {
        let collector = ErrorCollector::new();
        let b = RequestBuilder::new("http://h", HttpClient::new(), collector.sink())
            .header("bad name", "v")
            .header("ok", "line\nbreak");

        assert!(b.header_map().is_empty());
        let errors = collector.take();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(crate::Error::is_build));
        assert!(errors[0].to_string().contains("invalid header name"));
    }

    #[test]
    fn header_errors_name_method_and_target() {
        let collector = ErrorCollector::new();
        let _ = RequestBuilder::new("http://h", HttpClient::new(), collector.sink())
            .post("/items")
            .header("bad name", "v");

        let errors = collector.take();
        assert_eq!(errors[0].method(), Some("POST"));
        assert!(
            errors[0]
                .to_string()
                .starts_with("POST http://h/items: invalid header name \"bad name\""),
            "{}",
            errors[0]
        );
    }
}
