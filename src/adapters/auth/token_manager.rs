use std::time::Duration;

use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::adapters::http::transport::RetryingHttp;
use crate::domain::credentials::{AccessToken, Credentials};
use crate::error::{HotelError, Result};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// OAuth2 client-credentials token lifecycle.
///
/// The token is fetched lazily, cached, and replaced wholesale on a forced
/// refresh. Refreshes are serialized on the write lock, so concurrent
/// callers see either the old or the new token.
pub struct TokenManager {
    transport: RetryingHttp,
    auth_url: String,
    credentials: Credentials,
    cached: RwLock<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(transport: RetryingHttp, auth_url: String, credentials: Credentials) -> Self {
        Self {
            transport,
            auth_url,
            credentials,
            cached: RwLock::new(None),
        }
    }

    /// Return the cached token, exchanging credentials for a new one when
    /// `force` is set or nothing is cached yet.
    pub async fn get_token(&self, force: bool) -> Result<AccessToken> {
        if !force {
            let guard = self.cached.read().await;
            if let Some(token) = guard.as_ref() {
                return Ok(token.clone());
            }
        }

        let mut guard = self.cached.write().await;
        // Another caller may have filled the cache while we waited.
        if !force && let Some(token) = guard.as_ref() {
            return Ok(token.clone());
        }

        let token = self.exchange(force).await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    pub async fn cached_token(&self) -> Option<AccessToken> {
        self.cached.read().await.clone()
    }

    async fn exchange(&self, force: bool) -> Result<AccessToken> {
        if force {
            info!("Refreshing access token");
        } else {
            debug!("Requesting access token");
        }

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id()),
            ("client_secret", self.credentials.client_secret()),
        ];
        let json = self
            .transport
            .post_form(&self.auth_url, &form)
            .await
            .map_err(|e| match e {
                HotelError::Http { status, body } => HotelError::Auth {
                    reason: format!("token request failed: {status} {body}"),
                },
                HotelError::Json(e) => HotelError::Auth {
                    reason: format!("token response is not JSON: {e}"),
                },
                other => other,
            })?;

        let parsed: TokenResponse =
            serde_json::from_value(json).map_err(|e| HotelError::Auth {
                reason: format!("malformed token response: {e}"),
            })?;
        let value = parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| HotelError::Auth {
                reason: "missing access_token in token response".into(),
            })?;

        debug!(expires_in = parsed.expires_in, "Access token obtained");
        Ok(AccessToken::new(
            value,
            parsed.expires_in.map(Duration::from_secs),
        ))
    }
}
