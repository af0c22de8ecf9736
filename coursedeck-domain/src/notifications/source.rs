//! Sourcing strategies for the notification store.
//!
//! Exactly one strategy is active per store instance, selected at
//! construction: [`RemoteNotificationSource`] when a viewer identity is
//! known, [`LocalNotificationSource`] otherwise. The store never
//! branches on the mode; every mode-specific invariant lives in the
//! strategy itself.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notifications::api::NotificationApi;
use crate::notifications::errors::NotificationError;
use crate::notifications::types::Notification;
use crate::shared_types::UserId;

/// A consistent view of a source at one instant: the notification list
/// and the unread count that belongs with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceSnapshot {
    pub notifications: Vec<Notification>,
    /// In remote mode this is the service-provided count, which covers
    /// the whole remote set; the page above may be a subset of it.
    pub unread_count: usize,
}

impl SourceSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a snapshot from a full list, computing the unread count by
    /// scanning.
    pub fn from_notifications(notifications: Vec<Notification>) -> Self {
        let unread_count = notifications.iter().filter(|n| !n.read).count();
        Self {
            notifications,
            unread_count,
        }
    }
}

/// Strategy interface the notification store mutates and refetches
/// through.
#[async_trait]
pub trait NotificationSource: Send + Sync {
    /// Produces the current snapshot of this source.
    async fn load(&self) -> Result<SourceSnapshot, NotificationError>;

    /// Marks one notification as read. A missing `id` is a silent no-op.
    async fn mark_as_read(&self, id: &str) -> Result<(), NotificationError>;

    /// Marks every notification as read.
    async fn mark_all_as_read(&self) -> Result<(), NotificationError>;

    /// Removes one notification. A missing `id` is a silent no-op.
    async fn delete(&self, id: &str) -> Result<(), NotificationError>;

    /// Removes every notification.
    async fn clear_all(&self) -> Result<(), NotificationError>;
}

/// In-memory source seeded once at construction; active when no viewer
/// identity is available. All operations are immediate, infallible state
/// transformations over the held list.
pub struct LocalNotificationSource {
    notifications: RwLock<Vec<Notification>>,
}

impl LocalNotificationSource {
    pub fn new(seed: Vec<Notification>) -> Self {
        Self {
            notifications: RwLock::new(seed),
        }
    }
}

#[async_trait]
impl NotificationSource for LocalNotificationSource {
    async fn load(&self) -> Result<SourceSnapshot, NotificationError> {
        let notifications = self.notifications.read().unwrap();
        Ok(SourceSnapshot::from_notifications(notifications.clone()))
    }

    async fn mark_as_read(&self, id: &str) -> Result<(), NotificationError> {
        let mut notifications = self.notifications.write().unwrap();
        if let Some(notification) = notifications.iter_mut().find(|n| n.id == id) {
            notification.mark_as_read();
        }
        Ok(())
    }

    async fn mark_all_as_read(&self) -> Result<(), NotificationError> {
        let mut notifications = self.notifications.write().unwrap();
        for notification in notifications.iter_mut() {
            notification.mark_as_read();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), NotificationError> {
        let mut notifications = self.notifications.write().unwrap();
        notifications.retain(|n| n.id != id);
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), NotificationError> {
        let mut notifications = self.notifications.write().unwrap();
        notifications.clear();
        Ok(())
    }
}

/// Source backed by the Remote Notification Service; active when a
/// viewer identity is supplied. Mutations go straight to the service and
/// never touch cached state; reconciliation happens through the store's
/// refetch.
pub struct RemoteNotificationSource {
    api: Arc<dyn NotificationApi>,
    viewer: UserId,
    page_limit: u32,
}

impl RemoteNotificationSource {
    pub fn new(api: Arc<dyn NotificationApi>, viewer: UserId, page_limit: u32) -> Self {
        Self {
            api,
            viewer,
            page_limit,
        }
    }

    pub fn viewer(&self) -> &UserId {
        &self.viewer
    }
}

#[async_trait]
impl NotificationSource for RemoteNotificationSource {
    async fn load(&self) -> Result<SourceSnapshot, NotificationError> {
        let page = self
            .api
            .fetch_page(&self.viewer, self.page_limit)
            .await
            .map_err(NotificationError::fetch_failed)?;
        Ok(SourceSnapshot {
            notifications: page
                .notifications
                .into_iter()
                .map(|dto| dto.into_notification())
                .collect(),
            unread_count: page.unread_count as usize,
        })
    }

    async fn mark_as_read(&self, id: &str) -> Result<(), NotificationError> {
        self.api
            .mark_read(id)
            .await
            .map_err(|err| NotificationError::mutation_failed("mark_as_read", err))
    }

    async fn mark_all_as_read(&self) -> Result<(), NotificationError> {
        self.api
            .mark_all_read(&self.viewer)
            .await
            .map_err(|err| NotificationError::mutation_failed("mark_all_as_read", err))
    }

    async fn delete(&self, id: &str) -> Result<(), NotificationError> {
        self.api
            .delete(id)
            .await
            .map_err(|err| NotificationError::mutation_failed("delete", err))
    }

    async fn clear_all(&self) -> Result<(), NotificationError> {
        self.api
            .delete_all(&self.viewer)
            .await
            .map_err(|err| NotificationError::mutation_failed("clear_all", err))
    }
}
