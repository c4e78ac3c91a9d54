//! Client construction

use std::time::Duration;

use super::HttpClient;
use crate::config::HttpConfig;
use crate::redirect::Policy;

/// Builder for an [`HttpClient`] with non-default settings
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    config: HttpConfig,
    redirect: Option<Policy>,
}

impl HttpClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: HttpConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Start with `policy` instead of `Policy::limited(max_redirects)`
    #[must_use]
    pub fn redirect(mut self, policy: Policy) -> Self {
        self.redirect = Some(policy);
        self
    }

    #[must_use]
    pub fn build(self) -> HttpClient {
        let redirect = self
            .redirect
            .unwrap_or_else(|| Policy::limited(self.config.max_redirects));
        HttpClient::from_parts(self.config, redirect)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
