use std::fmt;
use std::sync::Arc;

use http::StatusCode;
use url::Url;

use super::attempt::{ActionKind, Attempt};

type CustomPolicy = Arc<dyn Fn(Attempt<'_>) -> super::Action + Send + Sync>;

/// Decides whether a redirect hop is followed.
///
/// Policies are cheap to clone, which lets callers save the current policy
/// of a shared client and put it back afterwards.
#[derive(Clone)]
pub struct Policy {
    inner: PolicyKind,
}

#[derive(Clone)]
enum PolicyKind {
    Custom(CustomPolicy),
    Limit(usize),
    None,
}

#[derive(Debug, thiserror::Error)]
#[error("too many redirects")]
struct TooManyRedirects;

impl Policy {
    /// Follow at most `max` hops, then fail with "too many redirects".
    #[must_use]
    pub fn limited(max: usize) -> Self {
        Self {
            inner: PolicyKind::Limit(max),
        }
    }

    /// Never follow. The first 3xx response is returned as-is.
    #[must_use]
    pub fn none() -> Self {
        Self {
            inner: PolicyKind::None,
        }
    }

    /// Let `policy` decide every hop.
    pub fn custom<T>(policy: T) -> Self
    where
        T: Fn(Attempt<'_>) -> super::Action + Send + Sync + 'static,
    {
        Self {
            inner: PolicyKind::Custom(Arc::new(policy)),
        }
    }

    /// True for the policy that never follows.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self.inner, PolicyKind::None)
    }

    pub(crate) fn check(&self, status: StatusCode, next: &Url, previous: &[Url]) -> ActionKind {
        let attempt = Attempt {
            status,
            next,
            previous,
        };
        match &self.inner {
            PolicyKind::Custom(custom) => custom(attempt).inner,
            PolicyKind::Limit(max) => {
                if previous.len() > *max {
                    attempt.error(TooManyRedirects).inner
                } else {
                    attempt.follow().inner
                }
            }
            PolicyKind::None => attempt.stop().inner,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::limited(10)
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            PolicyKind::Custom(..) => f.pad("Policy::custom"),
            PolicyKind::Limit(max) => f.debug_tuple("Policy::limited").field(max).finish(),
            PolicyKind::None => f.pad("Policy::none"),
        }
    }
}
