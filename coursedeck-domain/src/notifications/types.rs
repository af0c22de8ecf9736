use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notifications::time::relative_age;

// --- Enums ---

/// The category of a notification.
///
/// Determines icon and color in the presentation layer and has no other
/// behavioral effect here. Wire values the service does not recognize
/// collapse to [`NotificationCategory::System`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Course,
    Achievement,
    Comment,
    User,
    Reminder,
    #[default]
    #[serde(other)]
    System,
}

/// Filter applied when listing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Read,
}

impl NotificationFilter {
    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            NotificationFilter::All => true,
            NotificationFilter::Unread => !notification.read,
            NotificationFilter::Read => notification.read,
        }
    }
}

// --- Notification ---

/// A notification shown to a platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Opaque identifier, unique within a notification list and stable
    /// for the notification's lifetime.
    pub id: String,
    #[serde(default)]
    pub category: NotificationCategory,
    pub title: String,
    #[serde(default)]
    pub message: String,
    /// Absolute creation instant. Relative age strings are derived from
    /// this at read time, never stored.
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    /// Optional navigation target, opaque to this subsystem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Notification {
    pub fn new(
        category: NotificationCategory,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category,
            title: title.into(),
            message: message.into(),
            created_at: Utc::now(),
            read: false,
            link: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    pub fn mark_as_read(&mut self) {
        self.read = true;
    }

    /// Human-relative age of this notification at instant `now`.
    pub fn relative_age(&self, now: DateTime<Utc>) -> String {
        relative_age(self.created_at, now)
    }
}

/// The demonstration seed used by local-only mode when no viewer
/// identity is available: six notifications, three of them unread.
///
/// Always passed explicitly to a store constructor; nothing reads this
/// implicitly.
pub fn demo_notifications() -> Vec<Notification> {
    let now = Utc::now();
    vec![
        Notification::new(
            NotificationCategory::Course,
            "New course available",
            "The course 'Advanced React 2024' has been published",
        )
        .with_id("1")
        .with_link("/courses/advanced-react")
        .with_created_at(now - Duration::minutes(5)),
        Notification::new(
            NotificationCategory::Achievement,
            "Achievement unlocked",
            "You completed your first course. Congratulations!",
        )
        .with_id("2")
        .with_created_at(now - Duration::hours(1)),
        Notification::new(
            NotificationCategory::Comment,
            "New comment",
            "Maria Garcia replied to your question in 'TypeScript Basics'",
        )
        .with_id("3")
        .with_link("/courses/typescript-basics")
        .with_created_at(now - Duration::hours(2)),
        Notification::new(
            NotificationCategory::System,
            "Platform update",
            "New features have been added to the platform",
        )
        .with_id("4")
        .with_created_at(now - Duration::days(1))
        .with_read(true),
        Notification::new(
            NotificationCategory::User,
            "New follower",
            "Carlos Lopez started following you",
        )
        .with_id("5")
        .with_created_at(now - Duration::days(2))
        .with_read(true),
        Notification::new(
            NotificationCategory::Reminder,
            "Keep learning",
            "You have not finished 'Node.js Fundamentals' yet",
        )
        .with_id("6")
        .with_created_at(now - Duration::days(3))
        .with_read(true),
    ]
}
