//! Request body handling
//!
//! Encoded bodies are kept in memory and resent on every execute of the
//! builder. Reader and multipart bodies stream once.

use std::collections::BTreeMap;

use http::HeaderValue;
use http::header::CONTENT_TYPE;
use httptester_client::multipart;
use httptester_client::Body;
use serde::Serialize;
use tokio::io::AsyncRead;

use crate::builder::core::{ContentType, RequestBuilder};
use crate::error::constructors;

impl RequestBuilder {
    /// Set raw bytes as the request body. No Content-Type is implied.
    #[must_use]
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        let body = body.into();
        if self.debug_enabled {
            log::debug!("httptester: set request body {body:?}");
        }
        self.install_body(body);
        self
    }

    /// Stream the request body from `reader`.
    ///
    /// The reader is consumed by the first execute; later executes of the
    /// same builder send no body.
    #[must_use]
    pub fn body_reader<R>(self, reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        self.body(Body::from_reader(reader))
    }

    /// Set a URL-encoded form body and its Content-Type.
    ///
    /// Keys are encoded in sorted order; a repeated key keeps its last value.
    ///
    /// # Examples
    /// ```no_run
    /// use httptester::{ErrorSink, HttpClient, RequestBuilder};
    ///
    /// let builder = RequestBuilder::new("http://127.0.0.1:8080", HttpClient::new(), ErrorSink::panicking())
    ///     .post("/login")
    ///     .form([("user", "ann"), ("pass", "x&y")]);
    /// ```
    #[must_use]
    pub fn form<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        match serde_urlencoded::to_string(&fields) {
            Ok(encoded) => {
                self.set_content_type(ContentType::ApplicationFormUrlEncoded);
                self.install_body(Body::from(encoded));
            }
            Err(e) => self.report(constructors::encode("form", e)),
        }
        self
    }

    /// Serialize `value` as the JSON body and set the Content-Type.
    ///
    /// On a serialization failure the error is reported and neither the
    /// body nor the Content-Type is changed.
    ///
    /// # Examples
    /// ```no_run
    /// use httptester::{ErrorSink, HttpClient, RequestBuilder};
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct User {
    ///     name: String,
    /// }
    ///
    /// let builder = RequestBuilder::new("http://127.0.0.1:8080", HttpClient::new(), ErrorSink::panicking())
    ///     .post("/users")
    ///     .json(&User { name: "ann".into() });
    /// ```
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(encoded) => {
                self.set_content_type(ContentType::ApplicationJson);
                self.install_body(Body::from(encoded));
            }
            Err(e) => self.report(constructors::encode("JSON", e)),
        }
        self
    }

    /// Serialize `value` as the XML body and set the Content-Type.
    #[must_use]
    pub fn xml<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match quick_xml::se::to_string(value) {
            Ok(encoded) => {
                self.set_content_type(ContentType::ApplicationXml);
                self.install_body(Body::from(encoded));
            }
            Err(e) => self.report(constructors::encode("XML", e)),
        }
        self
    }

    /// Upload `content` as a multipart/form-data file part named
    /// `field_name`, preceded by the plain `fields`.
    ///
    /// The body streams from a producer task started when the request
    /// executes. A read error from `content` fails the request with that
    /// error as the cause.
    #[must_use]
    pub fn multipart_file<R, I, K, V>(
        mut self,
        field_name: &str,
        file_name: &str,
        content: R,
        fields: I,
    ) -> Self
    where
        R: AsyncRead + Send + 'static,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let upload = multipart::file_upload(field_name, file_name, content, fields);
        match HeaderValue::try_from(upload.content_type.as_str()) {
            Ok(value) => {
                self.headers.insert(CONTENT_TYPE, value);
            }
            Err(e) => {
                self.report(constructors::build_with("invalid multipart Content-Type", e));
                return self;
            }
        }
        if self.debug_enabled {
            log::debug!("httptester: multipart upload of {file_name:?} as field {field_name:?}");
        }
        self.install_body(upload.body);
        self.upload = Some(upload.producer);
        self
    }

    /// Replace the body, dropping any pending multipart producer.
    fn install_body(&mut self, body: Body) {
        self.upload = None;
        self.body = Some(body);
    }
}
