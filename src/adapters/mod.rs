pub mod amadeus;
pub mod auth;
pub mod clock;
pub mod http;
