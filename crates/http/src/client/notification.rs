//! Notifications and friend requests

use super::{ApiRequest, ClientError, PawClient};
use crate::types::{Notification, PageQuery, Paginated, UnreadCount};

const NOTIFICATIONS: &str = "/user/notifications/";
const FRIENDSHIPS: &str = "/user/friendships/";

/// Notification endpoints under `/user/notifications/`
pub struct NotificationsApi<'a> {
    client: &'a PawClient,
}

impl PawClient {
    /// Notifications and friend requests
    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi { client: self }
    }
}

impl NotificationsApi<'_> {
    /// Page through all notifications (page 1, 20 per page by default)
    pub async fn list(&self, page: &PageQuery) -> Result<Paginated<Notification>, ClientError> {
        let req = ApiRequest::get(NOTIFICATIONS)
            .param("page", page.page.unwrap_or(1))
            .param("page_size", page.page_size.unwrap_or(20));
        self.client.execute(req).await
    }

    pub async fn unread_count(&self) -> Result<u64, ClientError> {
        let count: UnreadCount = self
            .client
            .execute(ApiRequest::get(format!("{NOTIFICATIONS}unread_count/")))
            .await?;
        Ok(count.unread_count)
    }

    pub async fn unread(&self) -> Result<Vec<Notification>, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{NOTIFICATIONS}unread/")))
            .await
    }

    pub async fn mark_as_read(&self, id: u64) -> Result<(), ClientError> {
        self.client
            .execute_empty(ApiRequest::post(format!(
                "{NOTIFICATIONS}{id}/mark_as_read/"
            )))
            .await
    }

    pub async fn mark_all_as_read(&self) -> Result<(), ClientError> {
        self.client
            .execute_empty(ApiRequest::post(format!(
                "{NOTIFICATIONS}mark_all_as_read/"
            )))
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ClientError> {
        self.client
            .execute_empty(ApiRequest::delete(format!("{NOTIFICATIONS}{id}/")))
            .await
    }

    pub async fn accept_friend_request(&self, friendship_id: u64) -> Result<(), ClientError> {
        self.client
            .execute_empty(ApiRequest::post(format!(
                "{FRIENDSHIPS}{friendship_id}/accept/"
            )))
            .await
    }

    pub async fn reject_friend_request(&self, friendship_id: u64) -> Result<(), ClientError> {
        self.client
            .execute_empty(ApiRequest::post(format!(
                "{FRIENDSHIPS}{friendship_id}/reject/"
            )))
            .await
    }
}
