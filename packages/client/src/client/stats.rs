//! Client statistics

use std::sync::atomic::{AtomicU64, Ordering};

/// Request counters shared by every clone of a client
#[derive(Debug, Default)]
pub struct ClientStats {
    /// Dispatches started
    pub requests_total: AtomicU64,
    /// Dispatches that produced a response, whatever its status
    pub requests_successful: AtomicU64,
    /// Dispatches that ended in a transport error
    pub requests_failed: AtomicU64,
    /// Redirect hops followed
    pub redirects_followed: AtomicU64,
}

/// Point-in-time copy of [`ClientStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientStatsSnapshot {
    pub requests_total: u64,
    pub requests_successful: u64,
    pub requests_failed: u64,
    pub redirects_followed: u64,
}

impl ClientStats {
    #[inline]
    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_success(&self) {
        self.requests_successful.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_failure(&self) {
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_redirect(&self) {
        self.redirects_followed.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> ClientStatsSnapshot {
        ClientStatsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_successful: self.requests_successful.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            redirects_followed: self.redirects_followed.load(Ordering::Relaxed),
        }
    }
}
