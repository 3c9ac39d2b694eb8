use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::adapters::http::retry::{
    RequestKind, RetryPolicy, Step, excerpt, is_transient, retry_after_header,
};
use crate::config::types::ApiConfig;
use crate::error::{HotelError, Result};
use crate::ports::sleeper::Sleeper;

pub fn build_http_client(config: &ApiConfig) -> Result<Client> {
    let http = Client::builder()
        .user_agent(&config.user_agent)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .read_timeout(Duration::from_secs(config.read_timeout_secs))
        .build()?;
    Ok(http)
}

/// The pieces every retry loop shares: the pooled reqwest client, the
/// retry policy and the sleeper that backoff delays go through.
#[derive(Clone)]
pub struct RetryingHttp {
    http: Client,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl RetryingHttp {
    pub fn new(http: Client, policy: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            http,
            policy,
            sleeper,
        }
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Form-encoded POST with the shared retry protocol. A 401 is terminal.
    pub async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Value> {
        let mut attempt = 1;
        loop {
            debug!(url, attempt, "POST form request");
            let response = match self.http.post(url).form(form).send().await {
                Ok(response) => response,
                Err(e) => {
                    self.retry_transport_error(e, url, attempt).await?;
                    attempt += 1;
                    continue;
                }
            };

            let status = response.status();
            let retry_after = retry_after_header(response.headers());
            let step = self.policy.next_step(
                RequestKind::TokenExchange,
                status,
                attempt,
                retry_after.as_deref(),
            );
            match step {
                Step::Success => return json_body(response).await,
                Step::RateLimited { delay, exhausted } => {
                    self.rate_limited(url, delay, exhausted, attempt).await?;
                }
                Step::Backoff(delay) => self.backoff(url, status, delay, attempt).await,
                // never produced for a token exchange
                Step::RefreshToken | Step::Fail => return Err(http_error(response).await),
            }
            attempt += 1;
        }
    }

    /// Sleep out a 429, then fail if this was the last attempt.
    pub(crate) async fn rate_limited(
        &self,
        url: &str,
        delay: Duration,
        exhausted: bool,
        attempt: u32,
    ) -> Result<()> {
        warn!(
            url,
            attempt,
            delay_secs = delay.as_secs(),
            "Rate limited (429), sleeping before retry"
        );
        self.sleeper.sleep(delay).await;
        if exhausted {
            return Err(HotelError::RateLimitExceeded);
        }
        Ok(())
    }

    pub(crate) async fn backoff(
        &self,
        url: &str,
        status: StatusCode,
        delay: Duration,
        attempt: u32,
    ) {
        debug!(
            url,
            attempt,
            status = status.as_u16(),
            delay_secs = delay.as_secs_f64(),
            "Server error, backing off"
        );
        self.sleeper.sleep(delay).await;
    }

    /// Connect and timeout errors share the 5xx schedule and attempt counter.
    /// Anything else, or the last attempt, is returned as-is.
    pub(crate) async fn retry_transport_error(
        &self,
        err: reqwest::Error,
        url: &str,
        attempt: u32,
    ) -> Result<()> {
        if !is_transient(&err) || attempt >= self.policy.max_retries {
            return Err(HotelError::Transport(err));
        }
        let delay = self.policy.backoff_delay(attempt);
        warn!(
            url,
            attempt,
            error = %err,
            delay_secs = delay.as_secs_f64(),
            "Transport error, retrying"
        );
        self.sleeper.sleep(delay).await;
        Ok(())
    }
}

pub(crate) async fn json_body(response: Response) -> Result<Value> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

pub(crate) async fn http_error(response: Response) -> HotelError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    HotelError::Http {
        status,
        body: excerpt(&body),
    }
}
