use std::fmt;
use std::time::{Duration, Instant};

use crate::error::{HotelError, Result};

pub const CLIENT_ID_VAR: &str = "AMADEUS_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "AMADEUS_CLIENT_SECRET";

/// OAuth2 client-credentials pair. Validated once, immutable afterwards.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.trim().is_empty() || client_secret.trim().is_empty() {
            return Err(HotelError::Config(format!(
                "missing Amadeus credentials, set {CLIENT_ID_VAR} and {CLIENT_SECRET_VAR}"
            )));
        }
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    /// Read both values from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::new(
            std::env::var(CLIENT_ID_VAR).unwrap_or_default(),
            std::env::var(CLIENT_SECRET_VAR).unwrap_or_default(),
        )
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Bearer token obtained from the client-credentials exchange.
///
/// Staleness is discovered reactively through a 401; `expires_in` is kept
/// only for diagnostics.
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    obtained_at: Instant,
    expires_in: Option<Duration>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_in: Option<Duration>) -> Self {
        Self {
            value: value.into(),
            obtained_at: Instant::now(),
            expires_in,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn obtained_at(&self) -> Instant {
        self.obtained_at
    }

    pub fn expires_in(&self) -> Option<Duration> {
        self.expires_in
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("obtained_at", &self.obtained_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
