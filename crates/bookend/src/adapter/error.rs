//! Error types for the adapter layer.

use bookend_core::ObserverError;
use thiserror::Error;

use super::mapping::FixedKind;
use super::traits::ViewType;
use crate::config::ConfigError;

/// Errors that can occur while building or querying an adapter.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// A required argument was absent.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A position outside `0..item_count()` was queried.
    #[error("position {position} is out of range for an adapter with {count} items")]
    OutOfRange { position: usize, count: usize },

    /// Every view type in the band is in use.
    #[error("the {kind} view type band is full ({capacity} views)")]
    BandExhausted { kind: FixedKind, capacity: usize },

    /// A reserved view type that no registered header or footer carries.
    #[error("view type {0} does not belong to a registered header or footer")]
    UnknownViewType(ViewType),

    /// The wrapped adapter reported a view type inside a reserved band.
    #[error("wrapped adapter reported view type {0}, which lies in a reserved band")]
    ReservedViewType(ViewType),

    /// A header or footer holder was bound at a wrapped item position.
    #[error("a fixed view holder cannot be bound at item position {position}")]
    HolderMismatch { position: usize },

    /// Observer registration failed.
    #[error("observer error: {0}")]
    Observer(#[from] ObserverError),

    /// The adapter configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;
