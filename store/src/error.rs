use thiserror::Error;

use crate::Error as BoxError;

/// Errors returned by [`CallbackStore`](crate::CallbackStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// `listen` was called on a store that already ran.
    #[error("this store is already listening for interactions elsewhere")]
    AlreadyListening,

    /// A component without a custom ID was passed to `bind`.
    #[error("component has no custom_id to bind a callback to")]
    MissingCustomId,

    /// An owned interaction arrived for a custom ID nothing was bound to.
    #[error("no callback bound for component interaction {0}")]
    UnboundComponent(String),

    #[error("error waiting for interaction: {0}")]
    Listener(#[source] BoxError),

    #[error("error running interaction check: {0}")]
    Check(#[source] BoxError),

    #[error("error handling component interaction {custom_id}: {source}")]
    Callback {
        custom_id: String,
        #[source]
        source: BoxError,
    },
}

/// Returned by [`EventWaiter`](crate::EventWaiter) waits once it is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("event waiter was closed")]
pub struct WaiterClosed;
