use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {reason}")]
    Auth { reason: String },

    #[error("Rate limit exceeded after max retries")]
    RateLimitExceeded,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid search parameters: {reason}")]
    InvalidParams { reason: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, HotelError>;
