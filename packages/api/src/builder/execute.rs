//! Request execution
//!
//! Turns the accumulated configuration into an [`HttpRequest`], sends it
//! through the transport and reads the response in full.

use std::sync::Arc;

use http::Method;
use http::header::HOST;
use httptester_client::redirect::Policy;
use httptester_client::{Body, HttpRequest, Transport};
use url::Url;

use crate::builder::core::RequestBuilder;
use crate::error::constructors;
use crate::response::TestResponse;

/// Suppresses redirects on a transport until dropped.
///
/// The policy in place at install time is put back on drop, so every exit
/// path of execute restores it.
struct RedirectGuard<'a> {
    transport: &'a dyn Transport,
    prior: Option<Policy>,
}

impl<'a> RedirectGuard<'a> {
    fn install(transport: &'a dyn Transport) -> Self {
        let prior = transport.redirect_policy();
        transport.set_redirect_policy(Policy::none());
        Self {
            transport,
            prior: Some(prior),
        }
    }
}

impl Drop for RedirectGuard<'_> {
    fn drop(&mut self) {
        if let Some(prior) = self.prior.take() {
            self.transport.set_redirect_policy(prior);
        }
    }
}

impl RequestBuilder {
    /// Send the request and read the whole response body.
    ///
    /// Returns `None` when the request could not be built, sent, or its
    /// body read; the failure has then been reported to the error sink.
    /// Non-2xx statuses are not failures here.
    ///
    /// With [`no_follow`](RequestBuilder::no_follow) the transport's
    /// redirect policy is replaced for the duration of the call. Builders
    /// sharing one transport must not execute concurrently in that mode.
    pub async fn execute(&mut self) -> Option<TestResponse> {
        let mut request = self.finalize()?;

        let transport = Arc::clone(&self.transport);
        let guard = (!self.follow_redirects).then(|| RedirectGuard::install(transport.as_ref()));

        if let Some(before) = self.before.as_mut() {
            request = before(request);
        }
        let head = request.head().clone();
        let cancel = request.cancel_context().clone();

        if let Some(producer) = self.upload.take() {
            producer.spawn();
        }

        if self.debug_enabled {
            log::debug!(
                "httptester: dispatching {} {} (follow redirects: {})",
                head.method,
                head.url,
                self.follow_redirects
            );
        }

        let result = transport.dispatch(request).await;

        if let Some(after) = self.after.as_mut() {
            after(&head, result.as_ref().ok(), result.as_ref().err());
        }
        drop(guard);

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                self.report(constructors::transport(err).with_request(&head.method, &head.url));
                return None;
            }
        };

        let response = TestResponse::read(response, head, &cancel, self.sink.clone()).await?;
        if self.debug_enabled {
            log::debug!(
                "httptester: {} {} -> {} ({} bytes)",
                response.request().method,
                response.request().url,
                response.status(),
                response.body().len()
            );
        }
        Some(response)
    }

    /// Build the request from the current configuration.
    fn finalize(&mut self) -> Option<HttpRequest> {
        let raw = format!("{}{}", self.base_url, self.path);
        let mut url = match Url::parse(&raw) {
            Ok(url) => url,
            Err(e) => {
                self.report(constructors::url(e).with_target(self.method.as_deref(), &raw));
                return None;
            }
        };
        self.query.merge_into(&mut url);

        let method = match self.method.as_deref() {
            None => {
                self.report(constructors::build("no request method set").with_target(None, url.as_str()));
                return None;
            }
            Some(name) => match Method::from_bytes(name.as_bytes()) {
                Ok(method) => method,
                Err(e) => {
                    self.report(
                        constructors::build_with(format!("invalid method {name:?}"), e)
                            .with_target(Some(name), url.as_str()),
                    );
                    return None;
                }
            },
        };

        let cancel = self.cancel.clone().unwrap_or_default();
        let mut request = HttpRequest::new(method, url)
            .with_body(self.next_body())
            .with_cancel(cancel);

        // Host travels only in `RequestHead::host`.
        for (name, value) in self.headers.iter().filter(|(name, _)| **name != HOST) {
            request.headers_mut().append(name, value.clone());
        }
        if let Some(host) = self
            .headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .filter(|host| !host.is_empty())
        {
            request.set_host(host);
        }

        Some(request)
    }

    /// The body for this attempt. In-memory bodies stay on the builder
    /// for the next execute; streaming ones are handed over.
    fn next_body(&mut self) -> Option<Body> {
        match self.body.as_ref().and_then(Body::try_clone) {
            Some(copy) => Some(copy),
            None => self.body.take(),
        }
    }
}
