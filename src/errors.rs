//! Leader Detector Error Hierarchy
//!
//! Defines the error types a `detect()` caller can observe, categorized by
//! where the failure originated: the coordination-service watch, the
//! detector's own configuration, or an explicit teardown.

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The group collaborator's watch request failed; every pending waiter
    /// observes a copy of the underlying error
    #[error(transparent)]
    Watch(#[from] WatchError),

    /// Detector configuration loading failures
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    /// The detector was torn down while the request was pending.
    /// Observably distinct from both success and watch failure.
    #[error("detector was torn down before a result was available")]
    Canceled,
}

/// Failure modes of the coordination service backing the [`Group`]
/// collaborator. All transport, serialization and session failures are
/// collapsed into this taxonomy at the collaborator boundary.
///
/// `Clone` so that one watch failure can fan out to every pending waiter.
///
/// [`Group`]: crate::Group
#[derive(Debug, Clone, thiserror::Error)]
pub enum WatchError {
    /// The coordination-service session expired
    #[error("coordination session expired: {0}")]
    SessionExpired(String),

    /// Connectivity to the coordination service was lost
    #[error("connection to coordination service lost: {0}")]
    ConnectionLost(String),

    /// Any other coordination-service failure
    #[error("coordination error: {0}")]
    Coordination(String),
}
