use std::error::Error as StdError;
use std::io;

use super::helpers::{BrokenPipe, TimedOut};
use super::types::{Error, Kind};

impl Error {
    /// Returns true if the error is from a type Builder.
    #[must_use]
    pub fn is_builder(&self) -> bool {
        matches!(self.inner.kind, Kind::Builder)
    }

    /// Returns true if the error is from a redirect `Policy`.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self.inner.kind, Kind::Redirect)
    }

    /// Returns true if the request was canceled through its `CancelContext`.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self.inner.kind, Kind::Canceled)
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if matches!(self.inner.kind, Kind::Timeout) {
            return true;
        }

        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<TimedOut>() {
                return true;
            }
            if let Some(io) = err.downcast_ref::<io::Error>()
                && io.kind() == io::ErrorKind::TimedOut
            {
                return true;
            }
            source = err.source();
        }

        false
    }

    /// Returns true if the error is related to the request
    #[must_use]
    pub fn is_request(&self) -> bool {
        matches!(self.inner.kind, Kind::Request)
    }

    /// Returns true if the error is related to the request or response body.
    ///
    /// A request error whose cause is a failing request body also counts,
    /// because that is how a streaming producer's failure reaches the caller.
    #[must_use]
    pub fn is_body(&self) -> bool {
        if matches!(self.inner.kind, Kind::Body) {
            return true;
        }

        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<BrokenPipe>() {
                return true;
            }
            if let Some(hyper_err) = err.downcast_ref::<hyper::Error>()
                && hyper_err.is_user()
            {
                return true;
            }
            if let Some(inner) = err.downcast_ref::<Error>()
                && inner.kind() == Kind::Body
            {
                return true;
            }
            source = err.source();
        }

        false
    }
}
