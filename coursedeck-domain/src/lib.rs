//! Domain layer for the CourseDeck learning platform.
//!
//! This crate currently provides the notification center subsystem: the
//! [`notifications::NotificationStore`] with its two sourcing strategies
//! (remote service vs. in-memory seed), the HTTP adapter for the remote
//! notification service, and the derived-view helpers the presentation
//! layer consumes.

// Re-export core module
pub use coursedeck_core as core;

pub mod notifications;
pub mod shared_types;

pub use notifications::{
    Notification, NotificationCategory, NotificationError, NotificationEvent, NotificationFilter,
    NotificationStore,
};
pub use shared_types::UserId;
