use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, info};

use crate::adapters::auth::token_manager::TokenManager;
use crate::adapters::http::retry::{RequestKind, Step, retry_after_header};
use crate::adapters::http::transport::{RetryingHttp, build_http_client, http_error, json_body};
use crate::config::types::Config;
use crate::domain::batch::QueryParams;
use crate::domain::credentials::Credentials;
use crate::error::Result;
use crate::ports::sleeper::Sleeper;

/// Bearer-authenticated JSON client with the retry/backoff/rate-limit protocol.
///
/// Per attempt: 2xx returns the body, 429 sleeps (`Retry-After` or
/// exponential) and retries, 401 force-refreshes the token and retries,
/// 5xx backs off and retries. Everything else, or running out of attempts,
/// is terminal.
pub struct ResilientHttpClient {
    transport: RetryingHttp,
    tokens: Arc<TokenManager>,
}

impl ResilientHttpClient {
    pub fn new(transport: RetryingHttp, tokens: Arc<TokenManager>) -> Self {
        Self { transport, tokens }
    }

    /// Wire the reqwest client, retry policy and token manager from config.
    pub fn from_config(
        config: &Config,
        credentials: Credentials,
        sleeper: Arc<dyn Sleeper>,
    ) -> Result<Self> {
        let http = build_http_client(&config.api)?;
        let transport = RetryingHttp::new(http, (&config.retry).into(), sleeper);
        let tokens = Arc::new(TokenManager::new(
            transport.clone(),
            config.api.auth_url.clone(),
            credentials,
        ));
        Ok(Self::new(transport, tokens))
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Form POST through the shared retry protocol (no bearer header).
    pub async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Value> {
        self.transport.post_form(url, form).await
    }

    pub async fn get(&self, url: &str, params: &QueryParams) -> Result<Value> {
        let mut attempt = 1;
        loop {
            // Read the current token on every attempt so a refresh takes effect.
            let token = self.tokens.get_token(false).await?;
            debug!(url, attempt, "GET request");

            let sent = self
                .transport
                .http()
                .get(url)
                .query(params)
                .header(AUTHORIZATION, token.bearer())
                .send()
                .await;
            let response = match sent {
                Ok(response) => response,
                Err(e) => {
                    self.transport.retry_transport_error(e, url, attempt).await?;
                    attempt += 1;
                    continue;
                }
            };

            let status = response.status();
            let retry_after = retry_after_header(response.headers());
            let step = self.transport.policy().next_step(
                RequestKind::Authenticated,
                status,
                attempt,
                retry_after.as_deref(),
            );
            match step {
                Step::Success => return json_body(response).await,
                Step::RateLimited { delay, exhausted } => {
                    self.transport
                        .rate_limited(url, delay, exhausted, attempt)
                        .await?;
                }
                Step::RefreshToken => {
                    info!(url, attempt, "Token rejected (401), refreshing");
                    self.tokens.get_token(true).await?;
                }
                Step::Backoff(delay) => self.transport.backoff(url, status, delay, attempt).await,
                Step::Fail => return Err(http_error(response).await),
            }
            attempt += 1;
        }
    }
}
