pub mod batch;
pub mod credentials;
pub mod hotel;
pub mod offer;
pub mod search_params;
