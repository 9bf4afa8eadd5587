//! Unverified JWT claim inspection
//!
//! The backend issues SimpleJWT-style tokens. The client never validates
//! signatures; it only peeks at the payload to learn who is logged in and
//! when the access token runs out.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Claims the client cares about
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenClaims {
    /// Whether `exp` lies at or before `now` (unix seconds)
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| now >= exp)
    }
}

/// Decode the payload segment of `token`, or `None` if it is not a JWT
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}
