//! PawHaven HTTP client
//!
//! Every call goes through [`PawClient::send`], which attaches the stored
//! access token and, on a 401, refreshes it once (shared across concurrent
//! callers) before retrying the request a single time.

pub mod address;
pub mod adopt;
pub mod auth;
pub mod blog;
pub mod donation;
pub mod error;
pub mod holiday_family;
pub mod lost;
pub mod notification;
pub mod refresh;
pub mod request;
pub mod shelter;
pub mod ticket;
pub mod user;

use crate::types::{RefreshRequest, RefreshResponse};
use error::ClientError;
use pawhaven_core::{ClientConfig, CredentialStore, MemoryCredentialStore};
use refresh::RefreshGate;
use reqwest::{Client, ClientBuilder, Response, StatusCode, header};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub use request::{ApiRequest, FileUpload, MultipartForm, RequestBody};

const DEFAULT_USER_AGENT: &str = concat!("pawhaven-client/", env!("CARGO_PKG_VERSION"));
const DEFAULT_LOGIN_PATH: &str = "/user/token/";
const DEFAULT_REFRESH_PATH: &str = "/user/token/refresh/";

/// PawHaven API client
///
/// Cheap to clone; clones share the credential store and the refresh gate.
#[derive(Clone)]
pub struct PawClient {
    client: Client,
    base_url: String,
    login_path: String,
    refresh_path: String,
    credentials: Arc<dyn CredentialStore>,
    refresh: Arc<RefreshGate>,
}

impl PawClient {
    /// Create a new client with default configuration and in-memory credentials
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> PawClientBuilder {
        PawClientBuilder::default()
    }

    /// Create a client from loaded configuration
    pub fn from_config(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ClientError> {
        let mut builder = Self::builder()
            .base_url(&config.api.base_url)
            .user_agent(&config.api.user_agent)
            .login_path(&config.auth.login_path)
            .refresh_path(&config.auth.refresh_path)
            .credentials(credentials);
        if let Some(timeout) = config.api.timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The credential store this client reads tokens from
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Whether an access token is currently stored
    pub fn is_authenticated(&self) -> Result<bool, ClientError> {
        Ok(self.credentials.access_token()?.is_some())
    }

    pub(crate) fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Send a request through the authentication pipeline
    ///
    /// Returns the response as-is for anything but a 401. A 401 triggers one
    /// shared refresh and a single retry whose response is returned unchanged,
    /// even if it is another 401. Transport errors are never retried.
    ///
    /// # Errors
    ///
    /// - the transport error, if the request could not be sent
    /// - [`ClientError::AuthenticationFailed`] on a 401 with no refresh token stored
    /// - [`ClientError::RefreshFailed`] when the refresh call itself fails
    pub async fn send(&self, request: &ApiRequest) -> Result<Response, ClientError> {
        let access = self.credentials.access_token()?;
        let response = self.dispatch(request, access.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        // a refresh that settled while this request was in flight already replaced the token
        let current = self.credentials.access_token()?;
        if let Some(current) = current.filter(|token| access.as_deref() != Some(token.as_str())) {
            debug!(path = request.path(), "Access token changed meanwhile, retrying");
            return self.dispatch(request, Some(&current)).await;
        }

        let Some(refresh_token) = self.credentials.refresh_token()? else {
            warn!(path = request.path(), "Unauthorized with no refresh token, clearing credentials");
            self.credentials.clear()?;
            return Err(error_from_response(response).await);
        };

        let client = self.client.clone();
        let url = format!("{}{}", self.base_url, self.refresh_path);
        let credentials = Arc::clone(&self.credentials);
        let new_access = self
            .refresh
            .refresh(move || refresh_access_token(client, url, refresh_token, credentials))
            .await
            .map_err(ClientError::RefreshFailed)?;

        debug!(method = %request.method(), path = request.path(), "Retrying with refreshed token");
        self.dispatch(request, Some(&new_access)).await
    }

    /// Send a request and decode a JSON success body
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let response = self.send(&request).await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Send a request whose success body is irrelevant (deletes, actions)
    pub async fn execute_empty(&self, request: ApiRequest) -> Result<(), ClientError> {
        let response = self.send(&request).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        access_token: Option<&str>,
    ) -> Result<Response, ClientError> {
        let mut builder = request.build(&self.client, &self.base_url)?;
        if let Some(token) = access_token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = builder.send().await?;
        debug!(
            method = %request.method(),
            path = request.path(),
            status = response.status().as_u16(),
            authenticated = access_token.is_some(),
            "Request completed"
        );
        Ok(response)
    }
}

/// Exchange the refresh token for a new access token and store it
///
/// Goes straight to the transport so the refresh call is never itself
/// authenticated or refreshed. On failure both tokens are cleared.
async fn refresh_access_token(
    client: Client,
    url: String,
    refresh: String,
    credentials: Arc<dyn CredentialStore>,
) -> Result<String, ClientError> {
    match request_access_token(&client, &url, refresh).await {
        Ok(access) => {
            credentials.set_access_token(&access)?;
            debug!("Access token refreshed");
            Ok(access)
        }
        Err(e) => {
            warn!(error = %e, "Token refresh failed, clearing credentials");
            if let Err(clear_err) = credentials.clear() {
                warn!(error = %clear_err, "Failed to clear credentials");
            }
            Err(e)
        }
    }
}

async fn request_access_token(
    client: &Client,
    url: &str,
    refresh: String,
) -> Result<String, ClientError> {
    let response = client
        .post(url)
        .json(&RefreshRequest { refresh })
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    let body: RefreshResponse = response.json().await?;
    Ok(body.access)
}

async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let message = response.text().await.unwrap_or_else(|_| status.to_string());
    ClientError::from_status(status, message)
}

/// Builder for PawClient
#[derive(Default)]
pub struct PawClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    login_path: Option<String>,
    refresh_path: Option<String>,
    credentials: Option<Arc<dyn CredentialStore>>,
}

impl PawClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Path of the token-issue endpoint
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Path of the token-refresh endpoint
    pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = Some(path.into());
        self
    }

    /// Where tokens are read from and written to
    pub fn credentials(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<PawClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base_url is empty".into()));
        }

        let mut client_builder = ClientBuilder::new()
            .user_agent(self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()));
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let client = client_builder.build()?;

        Ok(PawClient {
            client,
            base_url,
            login_path: self
                .login_path
                .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string()),
            refresh_path: self
                .refresh_path
                .unwrap_or_else(|| DEFAULT_REFRESH_PATH.to_string()),
            credentials: self
                .credentials
                .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new())),
            refresh: Arc::new(RefreshGate::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawhaven_core::{CoreError, MockCredentialStore};

    #[test]
    fn builder_trims_trailing_slash() {
        let client = PawClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.login_path(), "/user/token/");
    }

    #[test]
    fn builder_requires_base_url() {
        assert!(matches!(
            PawClient::builder().build(),
            Err(ClientError::Configuration(_))
        ));
        assert!(matches!(
            PawClient::new("/"),
            Err(ClientError::Configuration(_))
        ));
    }

    #[test]
    fn from_config_uses_configured_paths() {
        let mut config = ClientConfig::default();
        config.api.base_url = "https://pets.example.org/".into();
        config.auth.login_path = "/auth/login/".into();
        let client =
            PawClient::from_config(&config, Arc::new(MemoryCredentialStore::new())).unwrap();
        assert_eq!(client.base_url(), "https://pets.example.org");
        assert_eq!(client.login_path(), "/auth/login/");
    }

    #[tokio::test]
    async fn storage_failure_surfaces_before_any_request() {
        let mut store = MockCredentialStore::new();
        store
            .expect_access_token()
            .returning(|| Err(CoreError::credential_store("locked")));

        // nothing listens on port 9; the store fails first
        let client = PawClient::builder()
            .base_url("http://127.0.0.1:9")
            .credentials(Arc::new(store))
            .build()
            .unwrap();

        let result = client.send(&ApiRequest::get("/pet/")).await;
        assert!(matches!(result, Err(ClientError::Credentials(_))));
    }

    #[tokio::test]
    async fn transport_errors_do_not_touch_credentials() {
        let mut store = MockCredentialStore::new();
        store.expect_access_token().returning(|| Ok(Some("A1".into())));
        store.expect_refresh_token().never();
        store.expect_clear().never();

        let client = PawClient::builder()
            .base_url("http://127.0.0.1:9")
            .timeout(Duration::from_secs(2))
            .credentials(Arc::new(store))
            .build()
            .unwrap();

        let result = client.send(&ApiRequest::get("/pet/")).await;
        assert!(matches!(result, Err(ClientError::Request(_))));
    }
}
