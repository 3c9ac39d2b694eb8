use async_trait::async_trait;
use serde_json::Value;

use crate::domain::batch::BatchResult;
use crate::domain::search_params::OfferSearchParams;
use crate::error::Result;

#[async_trait]
pub trait HotelApi: Send + Sync {
    async fn hotels_by_geocode(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: u32,
        max_hotels: usize,
    ) -> Result<Vec<Value>>;

    async fn hotels_by_city(&self, city_code: &str, max_hotels: usize) -> Result<Vec<Value>>;

    /// Offers for every requested hotel, one `BatchResult` per upstream chunk.
    async fn hotel_offers(&self, params: &OfferSearchParams) -> Result<Vec<BatchResult>>;
}
