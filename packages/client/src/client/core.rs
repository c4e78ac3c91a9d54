//! Core HTTP client implementation
//!
//! [`HttpClient`] is a pooled HTTP/1.1 client built on hyper. It follows
//! redirects itself so that the policy can be swapped at runtime, and it
//! honours each request's [`CancelContext`](crate::CancelContext).

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST, LOCATION, REFERER, TRANSFER_ENCODING, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use http_body_util::combinators::UnsyncBoxBody;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use url::Url;

use super::stats::{ClientStats, ClientStatsSnapshot};
use super::HttpClientBuilder;
use crate::config::HttpConfig;
use crate::error::{self, BoxError};
use crate::http::{Body, HttpRequest, HttpResponse, RequestHead};
use crate::redirect::{self, ActionKind, Policy};
use crate::transport::Transport;

type HyperClient = Client<HttpConnector, UnsyncBoxBody<Bytes, BoxError>>;

/// HTTP client with connection pooling and a swappable redirect policy
///
/// Clones share the connection pool, the statistics and the redirect
/// policy, the same way a single client shared across many tests would.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<ClientRef>,
}

struct ClientRef {
    hyper: HyperClient,
    config: HttpConfig,
    redirect: RwLock<Policy>,
    stats: ClientStats,
}

impl HttpClient {
    /// Create HttpClient with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HttpConfig::default())
    }

    /// Create HttpClient with custom configuration
    #[must_use]
    pub fn with_config(config: HttpConfig) -> Self {
        let redirect = Policy::limited(config.max_redirects);
        Self::from_parts(config, redirect)
    }

    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    pub(crate) fn from_parts(config: HttpConfig, redirect: Policy) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(config.connect_timeout);
        connector.set_nodelay(true);

        let hyper = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build(connector);

        Self {
            inner: Arc::new(ClientRef {
                hyper,
                config,
                redirect: RwLock::new(redirect),
                stats: ClientStats::default(),
            }),
        }
    }

    /// Get current configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.inner.config
    }

    /// Get client statistics for monitoring and telemetry
    #[inline]
    #[must_use]
    pub fn stats(&self) -> ClientStatsSnapshot {
        self.inner.stats.snapshot()
    }

    async fn follow(
        &self,
        mut head: RequestHead,
        mut body: Option<Body>,
        policy: &Policy,
    ) -> crate::Result<HttpResponse> {
        let mut visited: Vec<Url> = Vec::new();

        loop {
            if head.url.scheme() != "http" {
                return Err(error::url_bad_scheme(head.url.clone()));
            }

            let had_body = body.is_some();
            let replay = body.as_ref().and_then(Body::try_clone);
            let request = self.hyper_request(&head, body.take())?;

            tracing::debug!(method = %head.method, url = %head.url, "dispatching request");

            let response = self
                .inner
                .hyper
                .request(request)
                .await
                .map_err(|e| error::request(e).with_url(head.url.clone()))?;

            let status = response.status();
            let Some(next) = redirect_target(status, response.headers(), &head.url) else {
                return Ok(HttpResponse::from_hyper(response, head.url));
            };

            let resend_body = matches!(
                status,
                StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT
            );
            if resend_body && had_body && replay.is_none() {
                tracing::debug!(%status, url = %head.url, "streamed body cannot be replayed, not following");
                return Ok(HttpResponse::from_hyper(response, head.url));
            }

            visited.push(head.url.clone());
            match policy.check(status, &next, &visited) {
                ActionKind::Follow => {}
                ActionKind::Stop => {
                    tracing::debug!(%status, url = %head.url, "redirect policy stopped");
                    return Ok(HttpResponse::from_hyper(response, head.url));
                }
                ActionKind::Error(err) => return Err(error::redirect(err, head.url)),
            }
            drop(response);

            if resend_body {
                body = replay;
            } else {
                body = None;
                if head.method != Method::GET && head.method != Method::HEAD {
                    head.method = Method::GET;
                }
                head.headers.remove(CONTENT_TYPE);
                head.headers.remove(CONTENT_LENGTH);
                head.headers.remove(TRANSFER_ENCODING);
            }

            redirect::remove_sensitive_headers(&mut head.headers, &next, &visited);
            if redirect::is_cross_host(&next, &head.url) {
                head.host = None;
                head.headers.remove(HOST);
            }
            if self.inner.config.referer
                && let Some(referer) = redirect::make_referer(&next, &head.url)
            {
                head.headers.insert(REFERER, referer);
            }

            tracing::debug!(%status, from = %head.url, to = %next, "following redirect");
            self.inner.stats.record_redirect();
            head.url = next;
        }
    }

    fn hyper_request(
        &self,
        head: &RequestHead,
        body: Option<Body>,
    ) -> crate::Result<http::Request<UnsyncBoxBody<Bytes, BoxError>>> {
        let mut target = head.url.clone();
        target.set_fragment(None);
        let uri: http::Uri = target
            .as_str()
            .parse()
            .map_err(|e| error::builder(e).with_url(head.url.clone()))?;

        let mut request = http::Request::builder()
            .method(head.method.clone())
            .uri(uri)
            .body(body.unwrap_or_default().into_http_body())
            .map_err(|e| error::builder(e).with_url(head.url.clone()))?;

        *request.headers_mut() = head.headers.clone();

        if let Some(host) = &head.host {
            let value = HeaderValue::from_str(host)
                .map_err(|e| error::builder(e).with_url(head.url.clone()))?;
            request.headers_mut().insert(HOST, value);
        }

        if !request.headers().contains_key(USER_AGENT)
            && let Ok(value) = HeaderValue::from_str(&self.inner.config.user_agent)
        {
            request.headers_mut().insert(USER_AGENT, value);
        }

        Ok(request)
    }
}

/// The next URL for a followable redirect response, if this is one.
fn redirect_target(status: StatusCode, headers: &HeaderMap, current: &Url) -> Option<Url> {
    if !matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    ) {
        return None;
    }

    let location = headers.get(LOCATION)?.to_str().ok()?;
    match current.join(location) {
        Ok(next) => Some(next),
        Err(err) => {
            tracing::warn!(%location, error = %err, "ignoring unparsable Location header");
            None
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn dispatch(&self, request: HttpRequest) -> crate::Result<HttpResponse> {
        self.inner.stats.record_request();

        let (head, body, cancel) = request.into_parts();
        let cancel = match (cancel.deadline(), self.inner.config.request_timeout) {
            (None, Some(timeout)) => cancel.with_timeout(timeout),
            _ => cancel,
        };
        let method = head.method.clone();
        let url = head.url.clone();
        let policy = self.redirect_policy();

        let result = cancel
            .run(self.follow(head, body, &policy))
            .await
            .map_err(|err| match err.url() {
                Some(_) => err,
                None => err.with_url(url.clone()),
            });

        match &result {
            Ok(response) => {
                self.inner.stats.record_success();
                tracing::debug!(%method, %url, status = %response.status(), "received response");
            }
            Err(err) => {
                self.inner.stats.record_failure();
                tracing::warn!(%method, %url, error = %err, "request failed");
            }
        }

        result
    }

    fn redirect_policy(&self) -> Policy {
        self.inner
            .redirect
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_redirect_policy(&self, policy: Policy) {
        tracing::debug!(?policy, "redirect policy replaced");
        *self
            .inner
            .redirect
            .write()
            .unwrap_or_else(PoisonError::into_inner) = policy;
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.inner.config)
            .field("redirect", &self.redirect_policy())
            .field("stats", &self.inner.stats)
            .finish()
    }
}
