pub mod hotel_api;
pub mod sleeper;
