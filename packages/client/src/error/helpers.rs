/// A marker type to indicate that a request's deadline passed.
#[derive(Debug, thiserror::Error)]
#[error("deadline exceeded")]
pub struct TimedOut;

/// A marker type to indicate that a request was canceled.
#[derive(Debug, thiserror::Error)]
#[error("operation canceled")]
pub struct Canceled;

/// The read end of a body pipe went away before the writer finished.
#[derive(Debug, thiserror::Error)]
#[error("write on closed pipe")]
pub struct BrokenPipe;
