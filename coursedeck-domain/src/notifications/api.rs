//! HTTP adapter for the Remote Notification Service.
//!
//! The wire surface is five operations: a paginated list fetch returning
//! an authoritative unread count, single and bulk mark-as-read, and
//! single and bulk delete. [`NotificationApi`] is the seam the sourcing
//! layer talks to; [`HttpNotificationApi`] is the `reqwest`-backed
//! implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::notifications::types::{Notification, NotificationCategory};
use crate::shared_types::UserId;

/// Errors produced by the remote service adapter.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the connection failed.
    #[error("request to notification service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status. The body is not
    /// parsed in this case.
    #[error("notification service returned status {status}")]
    Status { status: reqwest::StatusCode },

    /// The service answered with a success status but an undecodable body.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

/// Wire representation of a single notification.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationDto {
    pub id: String,
    #[serde(rename = "type", default)]
    pub category: NotificationCategory,
    pub title: String,
    #[serde(default)]
    pub message: String,
    /// RFC 3339 timestamp string. Missing or unparsable values fall back
    /// to the current instant during conversion.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub course_slug: Option<String>,
    #[serde(default)]
    pub course_title: Option<String>,
}

impl NotificationDto {
    /// Converts the wire representation into the domain type, deriving
    /// the navigation link from the course slug when one is present.
    pub fn into_notification(self) -> Notification {
        let created_at = self
            .created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|parsed| parsed.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);
        let link = self
            .course_slug
            .as_deref()
            .map(|slug| format!("/courses/{}", slug));

        Notification {
            id: self.id,
            category: self.category,
            title: self.title,
            message: self.message,
            created_at,
            read: self.is_read,
            link,
        }
    }
}

/// One page of notifications plus the service-side unread count.
///
/// The unread count is authoritative for the whole remote set, which may
/// be larger than the page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationPage {
    #[serde(default)]
    pub notifications: Vec<NotificationDto>,
    #[serde(rename = "unreadCount", default)]
    pub unread_count: u64,
}

/// Interface to the Remote Notification Service.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Fetches one page of notifications for `viewer`, at most `limit`
    /// entries.
    async fn fetch_page(&self, viewer: &UserId, limit: u32) -> Result<NotificationPage, ApiError>;

    /// Marks a single notification as read.
    async fn mark_read(&self, id: &str) -> Result<(), ApiError>;

    /// Marks every notification of `viewer` as read.
    async fn mark_all_read(&self, viewer: &UserId) -> Result<(), ApiError>;

    /// Deletes a single notification.
    async fn delete(&self, id: &str) -> Result<(), ApiError>;

    /// Deletes every notification of `viewer`.
    async fn delete_all(&self, viewer: &UserId) -> Result<(), ApiError>;
}

/// `reqwest`-backed implementation of [`NotificationApi`].
#[derive(Debug, Clone)]
pub struct HttpNotificationApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotificationApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn from_config(config: &coursedeck_core::config::NotificationConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status { status })
        }
    }
}

#[async_trait]
impl NotificationApi for HttpNotificationApi {
    async fn fetch_page(&self, viewer: &UserId, limit: u32) -> Result<NotificationPage, ApiError> {
        let limit_value = limit.to_string();
        let response = self
            .client
            .get(self.url("/notifications"))
            .query(&[("viewerId", viewer.as_str()), ("limit", limit_value.as_str())])
            .send()
            .await?;
        let response = Self::check_status(response)?;
        response
            .json::<NotificationPage>()
            .await
            .map_err(|err| ApiError::InvalidBody(err.to_string()))
    }

    async fn mark_read(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .patch(self.url(&format!("/notifications/{}", id)))
            .json(&json!({ "isRead": true }))
            .send()
            .await?;
        Self::check_status(response).map(|_| ())
    }

    async fn mark_all_read(&self, viewer: &UserId) -> Result<(), ApiError> {
        let response = self
            .client
            .patch(self.url("/notifications/mark-read"))
            .json(&json!({
                "viewerId": viewer.as_str(),
                "markAll": true,
                "isRead": true,
            }))
            .send()
            .await?;
        Self::check_status(response).map(|_| ())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/notifications/{}", id)))
            .send()
            .await?;
        Self::check_status(response).map(|_| ())
    }

    async fn delete_all(&self, viewer: &UserId) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url("/notifications"))
            .json(&json!({
                "viewerId": viewer.as_str(),
                "deleteAll": true,
            }))
            .send()
            .await?;
        Self::check_status(response).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const PAGE_BODY: &str = r#"{
        "notifications": [
            {
                "id": "n-1",
                "type": "course",
                "title": "New course available",
                "message": "Check out 'Rust for the Web'",
                "created_at": "2024-05-30T10:00:00Z",
                "is_read": false,
                "course_slug": "rust-for-the-web",
                "course_title": "Rust for the Web"
            },
            {
                "id": "n-2",
                "title": "Maintenance window",
                "is_read": true
            }
        ],
        "unreadCount": 7
    }"#;

    #[tokio::test]
    async fn fetch_page_maps_dtos_and_unread_count() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/notifications")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("viewerId".into(), "user-1".into()),
                Matcher::UrlEncoded("limit".into(), "10".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PAGE_BODY)
            .create_async()
            .await;

        let api = HttpNotificationApi::new(server.url());
        let page = api.fetch_page(&UserId::new("user-1"), 10).await.unwrap();

        assert_eq!(page.unread_count, 7);
        assert_eq!(page.notifications.len(), 2);

        let first = page.notifications[0].clone().into_notification();
        assert_eq!(first.id, "n-1");
        assert_eq!(first.category, NotificationCategory::Course);
        assert_eq!(first.link.as_deref(), Some("/courses/rust-for-the-web"));
        assert!(!first.read);
        assert_eq!(
            first.created_at,
            "2024-05-30T10:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );

        // Missing type and slug: category defaults, no link.
        let second = page.notifications[1].clone().into_notification();
        assert_eq!(second.category, NotificationCategory::System);
        assert!(second.link.is_none());
        assert!(second.read);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_page_non_success_status_is_distinct_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/notifications")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("<html>Internal Server Error</html>")
            .create_async()
            .await;

        let api = HttpNotificationApi::new(server.url());
        let err = api.fetch_page(&UserId::new("user-1"), 10).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR
            }
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_page_undecodable_body_is_invalid_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/notifications")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let api = HttpNotificationApi::new(server.url());
        let err = api.fetch_page(&UserId::new("user-1"), 10).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody(_)));
    }

    #[tokio::test]
    async fn mark_read_patches_single_notification() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/notifications/n-1")
            .match_body(Matcher::Json(json!({ "isRead": true })))
            .with_status(200)
            .create_async()
            .await;

        let api = HttpNotificationApi::new(server.url());
        api.mark_read("n-1").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn mark_all_read_sends_bulk_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/notifications/mark-read")
            .match_body(Matcher::Json(json!({
                "viewerId": "user-1",
                "markAll": true,
                "isRead": true,
            })))
            .with_status(200)
            .create_async()
            .await;

        let api = HttpNotificationApi::new(server.url());
        api.mark_all_read(&UserId::new("user-1")).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_targets_single_notification() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/notifications/n-2")
            .with_status(200)
            .create_async()
            .await;

        let api = HttpNotificationApi::new(server.url());
        api.delete("n-2").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_all_sends_bulk_body_and_surfaces_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/notifications")
            .match_body(Matcher::Json(json!({
                "viewerId": "user-1",
                "deleteAll": true,
            })))
            .with_status(502)
            .create_async()
            .await;

        let api = HttpNotificationApi::new(server.url());
        let err = api.delete_all(&UserId::new("user-1")).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { .. }));
        mock.assert_async().await;
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpNotificationApi::new("http://localhost:3000/api/");
        assert_eq!(api.url("/notifications"), "http://localhost:3000/api/notifications");
    }

    #[test]
    fn dto_with_unparsable_timestamp_falls_back_to_now() {
        let dto = NotificationDto {
            id: "n-3".to_string(),
            category: NotificationCategory::System,
            title: "Title".to_string(),
            message: String::new(),
            created_at: Some("yesterday-ish".to_string()),
            is_read: false,
            course_slug: None,
            course_title: None,
        };
        let before = Utc::now();
        let notification = dto.into_notification();
        assert!(notification.created_at >= before);
    }
}
