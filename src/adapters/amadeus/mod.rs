pub mod batch_fetcher;
pub mod client;
