//! Notification center module for the CourseDeck domain layer.
//!
//! Provides the notification store and its collaborators: the canonical
//! notification types, the sourcing strategies (remote service vs. local
//! seed), the HTTP adapter for the remote notification service, and the
//! relative-time derivation used by the presentation layer.

pub mod api;
pub mod errors;
pub mod source;
pub mod store;
pub mod time;
pub mod types;

// Re-export primary types
pub use types::{demo_notifications, Notification, NotificationCategory, NotificationFilter};

// Re-export the error type
pub use errors::NotificationError;

// Re-export the sourcing strategies
pub use source::{
    LocalNotificationSource, NotificationSource, RemoteNotificationSource, SourceSnapshot,
};

// Re-export the remote service adapter
pub use api::{ApiError, HttpNotificationApi, NotificationApi, NotificationDto, NotificationPage};

// Re-export the store
pub use store::{NotificationEvent, NotificationStore};

// Re-export the relative-time helper
pub use time::relative_age;
