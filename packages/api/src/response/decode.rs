//! Structured decoding of the buffered body
//!
//! A Content-Type mismatch is reported but decoding is still attempted, so
//! a server that mislabels valid JSON produces one report, not two.

use http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use super::core::TestResponse;
use crate::error::constructors;

impl TestResponse {
    /// Decode the body as JSON.
    ///
    /// Reports a Content-Type error unless it begins with
    /// `application/json`, and a decode error if deserialization fails.
    ///
    /// # Examples
    /// ```no_run
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Item {
    ///     id: u64,
    /// }
    ///
    /// # async fn run(mut builder: httptester::RequestBuilder) {
    /// if let Some(resp) = builder.execute().await {
    ///     let item: Option<Item> = resp.assert_status(&[200]).decode_json();
    ///     assert_eq!(item.map(|i| i.id), Some(7));
    /// }
    /// # }
    /// ```
    pub fn decode_json<T: DeserializeOwned>(&self) -> Option<T> {
        self.check_content_type(&["application/json"]);
        match serde_json::from_slice(&self.body) {
            Ok(value) => Some(value),
            Err(e) => {
                self.report(constructors::decode("JSON", e));
                None
            }
        }
    }

    /// Decode the body as XML. Accepts a Content-Type beginning with
    /// `application/xml` or `text/xml`.
    pub fn decode_xml<T: DeserializeOwned>(&self) -> Option<T> {
        self.check_content_type(&["application/xml", "text/xml"]);
        let decoded = std::str::from_utf8(&self.body)
            .map_err(|e| constructors::decode("XML", e))
            .and_then(|text| quick_xml::de::from_str(text).map_err(|e| constructors::decode("XML", e)));
        match decoded {
            Ok(value) => Some(value),
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    fn check_content_type(&self, accepted: &[&str]) {
        let actual = self
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if !accepted.iter().any(|prefix| actual.starts_with(prefix)) {
            self.report(constructors::content_type(
                &accepted.join(" or "),
                actual,
                &self.excerpt(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{HeaderMap, HeaderValue, Method, StatusCode};
    use httptester_client::RequestHead;
    use serde::Deserialize;
    use url::Url;

    use crate::{ErrorCollector, TestResponse};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        a: i64,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Order {
        id: u32,
        status: String,
    }

    fn response(collector: &ErrorCollector, content_type: &'static str, body: &'static str) -> TestResponse {
        let url = Url::parse("http://api.test/x").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static(content_type));
        TestResponse::from_parts(
            StatusCode::OK,
            headers,
            Bytes::from_static(body.as_bytes()),
            url.clone(),
            RequestHead::new(Method::GET, url),
            collector.sink(),
        )
    }

    #[test]
    fn mislabelled_json_is_reported_and_still_decoded() {
        let collector = ErrorCollector::new();
        let item: Option<Item> = response(&collector, "text/plain", r#"{"a":1}"#).decode_json();

        assert_eq!(item, Some(Item { a: 1 }));
        let errors = collector.take();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_content_type());
        assert!(errors[0].to_string().contains("got text/plain"));
    }

    #[test]
    fn json_with_charset_is_accepted() {
        let collector = ErrorCollector::new();
        let item: Option<Item> =
            response(&collector, "application/json; charset=utf-8", r#"{"a":2}"#).decode_json();
        assert_eq!(item, Some(Item { a: 2 }));
        assert!(collector.is_empty());
    }

    #[test]
    fn invalid_json_reports_decode_error() {
        let collector = ErrorCollector::new();
        let item: Option<Item> = response(&collector, "application/json", "{not json").decode_json();

        assert!(item.is_none());
        let errors = collector.take();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_decode());
        assert!(errors[0].to_string().starts_with("GET http://api.test/x: error decoding JSON body"));
    }

    #[test]
    fn xml_accepts_text_xml() {
        let collector = ErrorCollector::new();
        let order: Option<Order> = response(
            &collector,
            "text/xml",
            "<Order><id>9</id><status>shipped</status></Order>",
        )
        .decode_xml();

        assert_eq!(
            order,
            Some(Order {
                id: 9,
                status: "shipped".into()
            })
        );
        assert!(collector.is_empty());
    }

    #[test]
    fn xml_rejects_json_content_type() {
        let collector = ErrorCollector::new();
        let order: Option<Order> = response(&collector, "application/json", "<Order/>").decode_xml();

        assert!(order.is_none());
        let errors = collector.take();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].is_content_type());
        assert!(errors[1].is_decode());
    }
}
