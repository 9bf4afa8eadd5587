//! Account and session endpoints

use super::{ApiRequest, ClientError, PawClient};
use crate::types::{
    CaptchaResponse, LoginRequest, LoginResponse, PasswordResetConfirm, ProfileUpdate,
    RegisterRequest, RegisterResponse, UserProfile,
};
use pawhaven_core::TokenPair;
use serde_json::json;
use tracing::info;

/// Account and session endpoints under `/user/`
pub struct AuthApi<'a> {
    client: &'a PawClient,
}

impl PawClient {
    /// Login, registration, password reset and profile endpoints
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }
}

impl AuthApi<'_> {
    /// Exchange credentials for a token pair and store it
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let req = ApiRequest::post(self.client.login_path()).json(request)?;
        let tokens: LoginResponse = self.client.execute(req).await?;
        self.client
            .credentials()
            .set_tokens(&TokenPair::new(tokens.access.clone(), tokens.refresh.clone()))?;
        info!(username = %request.username, "Logged in");
        Ok(tokens)
    }

    /// Forget the stored tokens
    pub fn logout(&self) -> Result<(), ClientError> {
        self.client.credentials().clear()?;
        info!("Logged out");
        Ok(())
    }

    /// Create an account; stores the tokens when the backend logs the user in directly
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, ClientError> {
        let req = ApiRequest::post("/user/register/").json(request)?;
        let response: RegisterResponse = self.client.execute(req).await?;
        if let Some(tokens) = &response.tokens {
            self.client
                .credentials()
                .set_tokens(&TokenPair::new(tokens.access.clone(), tokens.refresh.clone()))?;
        }
        Ok(response)
    }

    /// Email a password reset code
    pub async fn request_password_reset(&self, email: &str) -> Result<(), ClientError> {
        let req = ApiRequest::post("/user/password/reset/request/").json(&json!({ "email": email }))?;
        self.client.execute_empty(req).await
    }

    /// Set a new password using the emailed code
    pub async fn confirm_password_reset(
        &self,
        request: &PasswordResetConfirm,
    ) -> Result<(), ClientError> {
        let req = ApiRequest::post("/user/password/reset/confirm/").json(request)?;
        self.client.execute_empty(req).await
    }

    /// Email a registration verification code
    pub async fn send_email_code(&self, email: &str) -> Result<(), ClientError> {
        let req = ApiRequest::post("/user/send_email_code/").json(&json!({ "email": email }))?;
        self.client.execute_empty(req).await
    }

    /// Fetch a login captcha
    pub async fn captcha(&self) -> Result<CaptchaResponse, ClientError> {
        self.client.execute(ApiRequest::get("/user/captcha/")).await
    }

    /// Current user
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.client.execute(ApiRequest::get("/user/me/")).await
    }

    /// Current user's full profile
    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        self.client.execute(ApiRequest::get("/user/detail/")).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ClientError> {
        let req = ApiRequest::patch("/user/me/").json(update)?;
        self.client.execute(req).await
    }
}
