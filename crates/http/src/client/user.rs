//! Public user lookups

use super::{ApiRequest, ClientError, PawClient};
use serde_json::Value as JsonValue;

/// User endpoints; the backend's user serializers vary, so bodies stay untyped
pub struct UsersApi<'a> {
    client: &'a PawClient,
}

impl PawClient {
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }
}

impl UsersApi<'_> {
    pub async fn me(&self) -> Result<JsonValue, ClientError> {
        self.client.execute(ApiRequest::get("/user/me/")).await
    }

    pub async fn by_id(&self, id: u64) -> Result<JsonValue, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("/user/{id}/")))
            .await
    }

    pub async fn list(&self) -> Result<JsonValue, ClientError> {
        self.client.execute(ApiRequest::get("/user")).await
    }
}
