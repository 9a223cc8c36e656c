//! Error types for Bookend core.

use thiserror::Error;

/// Errors raised by an [`AdapterObservable`](crate::AdapterObservable).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverError {
    /// The observer is already registered with this observable.
    #[error("observer is already registered")]
    AlreadyRegistered,

    /// The observer ID is invalid or has already been unregistered.
    #[error("observer is not registered")]
    NotRegistered,
}

/// Result type for observer registration.
pub type ObserverResult<T> = Result<T, ObserverError>;
