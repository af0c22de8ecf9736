use thiserror::Error;

use crate::notifications::api::ApiError;

/// Errors surfaced by the notification subsystem.
///
/// Both variants are non-fatal: the store keeps its last-known-good
/// cached state and the caller may retry by re-invoking the triggering
/// action. Local-only sourcing never produces either variant.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Retrieving the notification list from the remote service failed.
    #[error("failed to fetch notifications: {source}")]
    FetchFailed {
        #[source]
        source: ApiError,
    },

    /// A remote mutation (mark-as-read, delete, ...) failed. No state
    /// change was applied.
    #[error("notification mutation '{operation}' failed: {source}")]
    MutationFailed {
        operation: &'static str,
        #[source]
        source: ApiError,
    },
}

impl NotificationError {
    pub fn fetch_failed(source: ApiError) -> Self {
        NotificationError::FetchFailed { source }
    }

    pub fn mutation_failed(operation: &'static str, source: ApiError) -> Self {
        NotificationError::MutationFailed { operation, source }
    }

    /// The name of the failed mutation, if this is a mutation failure.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            NotificationError::MutationFailed { operation, .. } => Some(operation),
            NotificationError::FetchFailed { .. } => None,
        }
    }
}
