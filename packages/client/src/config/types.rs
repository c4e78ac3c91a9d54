use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Hops the default redirect policy follows before failing
    pub max_redirects: usize,

    /// TCP connect timeout, unbounded when `None`
    pub connect_timeout: Option<Duration>,

    /// How long an idle pooled connection is kept
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections kept per host
    pub pool_max_idle_per_host: usize,

    /// Deadline applied to requests whose cancel context has none
    pub request_timeout: Option<Duration>,

    /// Sent when a request carries no User-Agent of its own
    pub user_agent: String,

    /// Set Referer when following redirects
    pub referer: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_redirects: 10,
            connect_timeout: None,
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: usize::MAX,
            request_timeout: None,
            user_agent: concat!("httptester/", env!("CARGO_PKG_VERSION")).to_string(),
            referer: true,
        }
    }
}
