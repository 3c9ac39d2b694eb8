use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::config::types::RetryConfig;

/// Upstream bodies are truncated to this many chars in error messages.
pub const BODY_EXCERPT_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Form POST against the token endpoint. A 401 is terminal.
    TokenExchange,
    /// Bearer GET. A 401 triggers a forced token refresh.
    Authenticated,
}

/// What the retry loop does after one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Success,
    /// Sleep `delay`, then retry unless `exhausted`.
    RateLimited { delay: Duration, exhausted: bool },
    RefreshToken,
    Backoff(Duration),
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_base: config.backoff_base,
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying a 5xx: `base^(attempt-1)` seconds, no jitter.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        secs_f64(self.pow(attempt.saturating_sub(1)))
    }

    /// Delay after a 429. A numeric `Retry-After` wins, otherwise
    /// `max(1, floor(base^attempt))` seconds.
    pub fn rate_limit_delay(&self, retry_after: Option<&str>, attempt: u32) -> Duration {
        if let Some(secs) = retry_after.and_then(parse_retry_after) {
            return Duration::from_secs(secs);
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        // `max` before `min` so a NaN power still lands on the one-second floor.
        let fallback = self.pow(attempt).floor().max(1.0).min(u64::MAX as f64) as u64;
        Duration::from_secs(fallback)
    }

    pub fn next_step(
        &self,
        kind: RequestKind,
        status: StatusCode,
        attempt: u32,
        retry_after: Option<&str>,
    ) -> Step {
        let can_retry = attempt < self.max_retries;
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Step::RateLimited {
                delay: self.rate_limit_delay(retry_after, attempt),
                exhausted: !can_retry,
            };
        }
        if status == StatusCode::UNAUTHORIZED && kind == RequestKind::Authenticated && can_retry {
            return Step::RefreshToken;
        }
        if status.is_success() {
            return Step::Success;
        }
        if status.is_server_error() && can_retry {
            return Step::Backoff(self.backoff_delay(attempt));
        }
        Step::Fail
    }

    fn pow(&self, exp: u32) -> f64 {
        self.backoff_base.powi(i32::try_from(exp).unwrap_or(i32::MAX))
    }
}

fn secs_f64(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

/// Only plain digit strings count; HTTP-date values fall back to backoff.
pub fn parse_retry_after(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

pub fn retry_after_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Connection and timeout failures are retried like a 5xx.
pub fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

pub fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
