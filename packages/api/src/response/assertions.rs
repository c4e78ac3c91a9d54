use regex::Regex;

use super::core::{TestResponse, excerpt};
use crate::error::constructors;

impl TestResponse {
    /// Check the status is one of `expected`. An empty list accepts any status.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn run(mut builder: httptester::RequestBuilder) {
    /// if let Some(resp) = builder.execute().await {
    ///     resp.assert_status(&[200, 201]).assert_contains("created");
    /// }
    /// # }
    /// ```
    pub fn assert_status(&self, expected: &[u16]) -> &Self {
        let actual = self.status.as_u16();
        if !expected.is_empty() && !expected.contains(&actual) {
            self.report(constructors::status(expected, actual, &self.excerpt()));
        }
        self
    }

    /// Check the body text contains `needle`.
    pub fn assert_contains(&self, needle: &str) -> &Self {
        if !self.text().contains(needle) {
            self.report(constructors::assertion(format!(
                "body does not contain {needle:?}: {}",
                self.excerpt()
            )));
        }
        self
    }

    /// Check the body text is exactly `expected`.
    pub fn assert_equals(&self, expected: &str) -> &Self {
        let text = self.text();
        if text != expected {
            self.report(constructors::assertion(format!(
                "body is not {:?}: {}",
                excerpt(expected),
                self.excerpt()
            )));
        }
        self
    }

    /// Check the first value of header `key` is exactly `expected`. A
    /// missing header compares as the empty string.
    pub fn assert_header_eq(&self, key: &str, expected: &str) -> &Self {
        let actual = self.header_str(key);
        if actual != expected {
            self.report(constructors::assertion(format!(
                "header {key} is {actual:?}, expected {expected:?}"
            )));
        }
        self
    }

    /// Check the first value of header `key` contains `needle`.
    pub fn assert_header_contains(&self, key: &str, needle: &str) -> &Self {
        let actual = self.header_str(key);
        if !actual.contains(needle) {
            self.report(constructors::assertion(format!(
                "header {key} is {actual:?}, which does not contain {needle:?}"
            )));
        }
        self
    }

    /// Check the body text matches the regular expression `pattern`.
    pub fn assert_matches(&self, pattern: &str) -> &Self {
        match Regex::new(pattern) {
            Ok(re) if re.is_match(&self.text()) => {}
            Ok(_) => self.report(constructors::assertion(format!(
                "body does not match /{pattern}/: {}",
                self.excerpt()
            ))),
            Err(e) => self.report(constructors::assertion(format!("invalid pattern /{pattern}/: {e}"))),
        }
        self
    }

    fn header_str(&self, key: &str) -> String {
        self.headers
            .get(key)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{HeaderMap, HeaderValue, Method, StatusCode};
    use httptester_client::RequestHead;
    use url::Url;

    use crate::{ErrorCollector, TestResponse};

    fn response(collector: &ErrorCollector, status: u16, body: &'static str) -> TestResponse {
        let url = Url::parse("http://api.test/items").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("abc-123"));
        TestResponse::from_parts(
            StatusCode::from_u16(status).unwrap(),
            headers,
            Bytes::from_static(body.as_bytes()),
            url.clone(),
            RequestHead::new(Method::POST, url),
            collector.sink(),
        )
    }

    #[test]
    fn status_mismatch_lists_expected_codes() {
        let collector = ErrorCollector::new();
        response(&collector, 409, "Already exists").assert_status(&[200, 201]);

        assert_eq!(
            collector.messages(),
            ["POST http://api.test/items: expected status [200 201] got 409: Already exists"]
        );
    }

    #[test]
    fn empty_status_list_accepts_anything() {
        let collector = ErrorCollector::new();
        response(&collector, 503, "down").assert_status(&[]);
        assert!(collector.is_empty());
    }

    #[test]
    fn failed_assertions_do_not_stop_the_chain() {
        let collector = ErrorCollector::new();
        response(&collector, 500, "boom")
            .assert_status(&[200])
            .assert_contains("ok")
            .assert_equals("fine")
            .assert_header_eq("x-request-id", "zzz")
            .assert_contains("boo");

        let errors = collector.take();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].is_status());
        assert!(errors[1..].iter().all(crate::Error::is_assertion));
    }

    #[test]
    fn header_assertions() {
        let collector = ErrorCollector::new();
        response(&collector, 200, "")
            .assert_header_eq("X-Request-Id", "abc-123")
            .assert_header_contains("x-request-id", "123")
            .assert_header_eq("x-missing", "");
        assert!(collector.is_empty());

        response(&collector, 200, "").assert_header_contains("x-missing", "a");
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn regex_assertions() {
        let collector = ErrorCollector::new();
        let resp = response(&collector, 200, "order 42 shipped");
        resp.assert_matches(r"order \d+ shipped");
        assert!(collector.is_empty());

        resp.assert_matches(r"^\d+$").assert_matches("(unclosed");
        let messages = collector.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("does not match"));
        assert!(messages[1].contains("invalid pattern"));
    }
}
