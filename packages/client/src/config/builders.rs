//! Builder methods for transport configuration

use std::time::Duration;

use super::types::HttpConfig;

impl HttpConfig {
    /// Set how many hops the default redirect policy follows
    ///
    /// # Examples
    /// ```
    /// use httptester_client::HttpConfig;
    ///
    /// let config = HttpConfig::default().with_max_redirects(3);
    /// assert_eq!(config.max_redirects, 3);
    /// ```
    #[must_use]
    pub fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Give every request without its own deadline this much time
    ///
    /// The timer covers sending the request and receiving the response head,
    /// including any redirect hops. Reading the body is not covered.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_referer(mut self, enabled: bool) -> Self {
        self.referer = enabled;
        self
    }
}
