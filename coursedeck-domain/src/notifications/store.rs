//! The notification store for the CourseDeck domain layer.
//!
//! [`NotificationStore`] is the single source of truth for "what
//! notifications does the current viewer see, and what is unread". It
//! holds a cached snapshot of its sourcing strategy and reconciles after
//! every mutation by refetching through that strategy, so displayed
//! state always reflects a source response rather than a client-side
//! guess.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use coursedeck_core::config::NotificationConfig;

use crate::notifications::api::NotificationApi;
use crate::notifications::errors::NotificationError;
use crate::notifications::source::{
    LocalNotificationSource, NotificationSource, RemoteNotificationSource, SourceSnapshot,
};
use crate::notifications::types::{Notification, NotificationFilter};
use crate::shared_types::UserId;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Events published by the store after state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    /// The cached snapshot was replaced by a fresh source response.
    Refreshed { total: usize, unread: usize },
    /// A single notification was marked as read.
    MarkedAsRead { id: String },
    /// Every notification was marked as read.
    AllMarkedAsRead,
    /// A single notification was deleted.
    Deleted { id: String },
    /// Every notification was deleted.
    Cleared,
}

struct StoreInner {
    source: Arc<dyn NotificationSource>,
    cache: RwLock<SourceSnapshot>,
    events: broadcast::Sender<NotificationEvent>,
}

impl StoreInner {
    /// Refetches through the source and replaces the cache on success.
    ///
    /// On failure the previous cache is left untouched. Concurrent
    /// refreshes (timer, focus, manual) are not serialized: the last
    /// response received overwrites the cache, so a slower earlier fetch
    /// may briefly win over a newer one.
    async fn refresh(&self) -> Result<(), NotificationError> {
        let snapshot = self.source.load().await?;
        let total = snapshot.notifications.len();
        let unread = snapshot.unread_count;
        *self.cache.write().unwrap() = snapshot;
        debug!("notification cache refreshed: {} total, {} unread", total, unread);
        let _ = self.events.send(NotificationEvent::Refreshed { total, unread });
        Ok(())
    }

    /// Post-mutation refetch. The mutation already succeeded, so a
    /// failure here only logs: the cache stays at its last-known-good
    /// value until the next revalidation.
    async fn reconcile(&self, operation: &str) {
        if let Err(err) = self.refresh().await {
            warn!(
                "refetch after '{}' failed, keeping previous notifications: {}",
                operation, err
            );
        }
    }

    fn publish(&self, event: NotificationEvent) {
        let _ = self.events.send(event);
    }
}

/// Single source of truth for a viewer's notifications.
///
/// The sourcing mode is fixed when the store is built and never
/// re-evaluated per call: [`NotificationStore::for_viewer`] selects the
/// remote-backed strategy, [`NotificationStore::with_seed`] the
/// local-only one.
pub struct NotificationStore {
    inner: Arc<StoreInner>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl NotificationStore {
    /// Builds a store over an explicit sourcing strategy with an empty
    /// cache and no background refresh.
    pub fn new(source: Arc<dyn NotificationSource>) -> Self {
        Self::with_initial_snapshot(source, SourceSnapshot::empty())
    }

    fn with_initial_snapshot(source: Arc<dyn NotificationSource>, snapshot: SourceSnapshot) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(StoreInner {
                source,
                cache: RwLock::new(snapshot),
                events,
            }),
            refresh_task: Mutex::new(None),
        }
    }

    /// Builds a local-only store over the given seed list. The cache is
    /// primed synchronously; no background refresh runs.
    pub fn with_seed(seed: Vec<Notification>) -> Self {
        let snapshot = SourceSnapshot::from_notifications(seed.clone());
        Self::with_initial_snapshot(Arc::new(LocalNotificationSource::new(seed)), snapshot)
    }

    /// Builds a remote-backed store for `viewer` and starts background
    /// revalidation. The first interval tick fires immediately and
    /// performs the initial fetch; if it fails the cache simply stays
    /// empty until a later refresh succeeds.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn for_viewer(
        api: Arc<dyn NotificationApi>,
        viewer: UserId,
        config: &NotificationConfig,
    ) -> Self {
        let source = RemoteNotificationSource::new(api, viewer, config.page_limit);
        let store = Self::new(Arc::new(source));
        store.start_periodic_refresh(config.refresh_interval());
        store
    }

    /// Starts (or restarts) the background revalidation task.
    ///
    /// The task holds only a weak handle on the store state, ends itself
    /// once the store is gone, and is aborted eagerly on drop.
    pub fn start_periodic_refresh(&self, every: Duration) {
        let weak = Arc::downgrade(&self.inner);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let inner = match weak.upgrade() {
                    Some(inner) => inner,
                    None => break,
                };
                if let Err(err) = inner.refresh().await {
                    warn!("background notification refresh failed: {}", err);
                }
            }
        });

        let mut guard = self.refresh_task.lock().unwrap();
        if let Some(previous) = guard.replace(task) {
            previous.abort();
        }
    }

    /// Refetches the notification list through the source now.
    ///
    /// On failure the cached list is left unchanged and the error is
    /// returned to the caller; nothing is retried automatically.
    pub async fn refresh(&self) -> Result<(), NotificationError> {
        self.inner.refresh().await
    }

    /// Revalidation hook for the consuming surface regaining user focus.
    /// A failed refetch is logged, not surfaced; the cache keeps its
    /// last-known-good value.
    pub async fn revalidate(&self) {
        if let Err(err) = self.inner.refresh().await {
            warn!("focus revalidation failed, keeping previous notifications: {}", err);
        }
    }

    /// The notifications matching `filter`, in source order. Recomputed
    /// from the current snapshot on every call.
    pub fn list(&self, filter: NotificationFilter) -> Vec<Notification> {
        let cache = self.inner.cache.read().unwrap();
        cache
            .notifications
            .iter()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect()
    }

    /// The unread count for the viewer. In remote mode this is the
    /// service-provided figure, which may exceed what the cached page
    /// shows; in local mode it equals the unread entries of the list.
    pub fn unread_count(&self) -> usize {
        self.inner.cache.read().unwrap().unread_count
    }

    /// Marks one notification as read, then refetches. A missing `id` is
    /// a non-error no-op in local mode. On mutation failure the cached
    /// list is left exactly as it was.
    pub async fn mark_as_read(&self, id: &str) -> Result<(), NotificationError> {
        self.inner.source.mark_as_read(id).await?;
        self.inner.publish(NotificationEvent::MarkedAsRead { id: id.to_string() });
        self.inner.reconcile("mark_as_read").await;
        Ok(())
    }

    /// Marks every notification in the viewer's set as read, then
    /// refetches.
    pub async fn mark_all_as_read(&self) -> Result<(), NotificationError> {
        self.inner.source.mark_all_as_read().await?;
        self.inner.publish(NotificationEvent::AllMarkedAsRead);
        self.inner.reconcile("mark_all_as_read").await;
        Ok(())
    }

    /// Deletes one notification permanently, then refetches.
    pub async fn delete(&self, id: &str) -> Result<(), NotificationError> {
        self.inner.source.delete(id).await?;
        self.inner.publish(NotificationEvent::Deleted { id: id.to_string() });
        self.inner.reconcile("delete").await;
        Ok(())
    }

    /// Deletes every notification for the viewer, then refetches.
    pub async fn clear_all(&self) -> Result<(), NotificationError> {
        self.inner.source.clear_all().await?;
        self.inner.publish(NotificationEvent::Cleared);
        self.inner.reconcile("clear_all").await;
        Ok(())
    }

    /// Subscribes to store events. Slow receivers may observe lagged
    /// gaps, as with any broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.inner.events.subscribe()
    }
}

impl Drop for NotificationStore {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.refresh_task.lock() {
            if let Some(task) = guard.take() {
                task.abort();
            }
        }
    }
}
