use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_url: default_auth_url(),
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Retry policy shared by the token exchange and every authenticated GET.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    #[serde(default = "default_backoff_base")]
    pub backoff_base: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_retries(),
            backoff_base: default_backoff_base(),
        }
    }
}

/// Inputs for the command-line fetch run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_radius_km")]
    pub radius_km: u32,
    /// When set, hotels are listed by IATA city code instead of geocode.
    #[serde(default)]
    pub city_code: Option<String>,
    #[serde(default = "default_max_hotels")]
    pub max_hotels: usize,
    /// Only the first this-many hotels found are searched for offers.
    #[serde(default = "default_max_offer_hotels")]
    pub max_offer_hotels: usize,
    #[serde(default = "default_check_in_offset_days")]
    pub check_in_offset_days: u32,
    #[serde(default = "default_one")]
    pub nights: u32,
    #[serde(default = "default_one")]
    pub adults: u32,
    #[serde(default = "default_one")]
    pub rooms: u32,
    #[serde(default = "default_currency")]
    pub currency: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            radius_km: default_radius_km(),
            city_code: None,
            max_hotels: default_max_hotels(),
            max_offer_hotels: default_max_offer_hotels(),
            check_in_offset_days: default_check_in_offset_days(),
            nights: default_one(),
            adults: default_one(),
            rooms: default_one(),
            currency: default_currency(),
        }
    }
}

fn default_base_url() -> String {
    "https://test.api.amadeus.com".into()
}

fn default_auth_url() -> String {
    "https://test.api.amadeus.com/v1/security/oauth2/token".into()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_read_timeout() -> u64 {
    20
}

fn default_user_agent() -> String {
    concat!("amadeus-hotels/", env!("CARGO_PKG_VERSION")).into()
}

fn default_retries() -> u32 {
    3
}

fn default_backoff_base() -> f64 {
    2.0
}

// Nice, France
fn default_latitude() -> f64 {
    43.7102
}

fn default_longitude() -> f64 {
    7.2620
}

fn default_radius_km() -> u32 {
    7
}

fn default_max_hotels() -> usize {
    20
}

fn default_max_offer_hotels() -> usize {
    10
}

fn default_check_in_offset_days() -> u32 {
    1
}

fn default_one() -> u32 {
    1
}

#[allow(clippy::unnecessary_wraps)]
fn default_currency() -> Option<String> {
    Some("EUR".into())
}
