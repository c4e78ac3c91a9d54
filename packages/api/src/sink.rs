//! Error sinks.
//!
//! Builders and responses never return failures to the caller. Every
//! failure is pushed into an [`ErrorSink`], typically one that fails the
//! current test.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::Error;

/// Callback that receives every failure raised while building, executing or
/// asserting on a request.
#[derive(Clone)]
pub struct ErrorSink {
    f: Arc<dyn Fn(Error) + Send + Sync>,
}

impl ErrorSink {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Error) + Send + Sync + 'static,
    {
        ErrorSink { f: Arc::new(f) }
    }

    /// A sink that panics with the error's message, failing the running test.
    #[must_use]
    pub fn panicking() -> Self {
        ErrorSink::new(|err| panic!("{err}"))
    }

    /// A sink that only logs at error level.
    #[must_use]
    pub fn logging() -> Self {
        ErrorSink::new(|err| log::error!("{err}"))
    }

    pub fn report(&self, err: Error) {
        log::debug!("httptester: reporting {:?} error: {err}", err.kind());
        (self.f)(err);
    }
}

impl Default for ErrorSink {
    fn default() -> Self {
        ErrorSink::panicking()
    }
}

impl fmt::Debug for ErrorSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorSink").finish_non_exhaustive()
    }
}

/// Records reported errors instead of failing, so tests can inspect them.
///
/// ```
/// use httptester::ErrorCollector;
///
/// let collector = ErrorCollector::new();
/// let sink = collector.sink();
/// # drop(sink);
/// assert!(collector.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector {
    errors: Arc<Mutex<Vec<Error>>>,
}

impl ErrorCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink appending into this collector.
    #[must_use]
    pub fn sink(&self) -> ErrorSink {
        let errors = Arc::clone(&self.errors);
        ErrorSink::new(move |err| {
            errors
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(err);
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rendered messages of the errors collected so far, in report order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Drain the collected errors.
    pub fn take(&self) -> Vec<Error> {
        std::mem::take(&mut *self.errors.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
