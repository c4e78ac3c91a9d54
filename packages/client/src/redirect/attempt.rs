//! What a redirect policy sees, and what it can decide

use std::error::Error as StdError;

use http::StatusCode;
use url::Url;

/// One proposed redirect hop, with the chain of URLs visited so far.
#[derive(Debug)]
pub struct Attempt<'a> {
    pub(crate) status: StatusCode,
    pub(crate) next: &'a Url,
    pub(crate) previous: &'a [Url],
}

/// The decision returned by a policy for an [`Attempt`].
#[derive(Debug)]
pub struct Action {
    pub(crate) inner: ActionKind,
}

#[derive(Debug)]
pub(crate) enum ActionKind {
    Follow,
    Stop,
    Error(Box<dyn StdError + Send + Sync>),
}

impl Attempt<'_> {
    /// The 3xx status that triggered this attempt.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Where the response wants to send us.
    #[must_use]
    pub fn url(&self) -> &Url {
        self.next
    }

    /// URLs already requested in this chain, oldest first.
    #[must_use]
    pub fn previous(&self) -> &[Url] {
        self.previous
    }

    /// Request `url()` next.
    #[must_use]
    pub fn follow(self) -> Action {
        Action {
            inner: ActionKind::Follow,
        }
    }

    /// Do not follow. The 3xx response is returned as the dispatch result.
    #[must_use]
    pub fn stop(self) -> Action {
        Action {
            inner: ActionKind::Stop,
        }
    }

    /// Fail the dispatch with `error`.
    pub fn error<E: Into<Box<dyn StdError + Send + Sync>>>(self, error: E) -> Action {
        Action {
            inner: ActionKind::Error(error.into()),
        }
    }
}
