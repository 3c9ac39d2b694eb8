use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::adapters::amadeus::batch_fetcher::BatchFetcher;
use crate::adapters::http::client::ResilientHttpClient;
use crate::domain::batch::{BatchResult, QueryParams};
use crate::domain::hotel::hotel_list;
use crate::domain::search_params::OfferSearchParams;
use crate::error::{HotelError, Result};
use crate::ports::hotel_api::HotelApi;

const BY_GEOCODE_PATH: &str = "/v1/reference-data/locations/hotels/by-geocode";
const BY_CITY_PATH: &str = "/v1/reference-data/locations/hotels/by-city";
const OFFERS_PATH: &str = "/v3/shopping/hotel-offers";

/// The upstream accepts `page[limit]` up to 100.
const MAX_PAGE_LIMIT: usize = 100;

pub struct AmadeusHotelsClient {
    client: Arc<ResilientHttpClient>,
    base_url: String,
    offers: BatchFetcher,
}

impl AmadeusHotelsClient {
    pub fn new(client: Arc<ResilientHttpClient>, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let offers = BatchFetcher::new(Arc::clone(&client), format!("{base_url}{OFFERS_PATH}"));
        Self {
            client,
            base_url,
            offers,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl HotelApi for AmadeusHotelsClient {
    async fn hotels_by_geocode(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: u32,
        max_hotels: usize,
    ) -> Result<Vec<Value>> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(HotelError::InvalidParams {
                reason: format!("coordinates out of range: {latitude}, {longitude}"),
            });
        }

        let params: QueryParams = vec![
            ("latitude".into(), format!("{latitude:.6}")),
            ("longitude".into(), format!("{longitude:.6}")),
            ("radius".into(), radius_km.to_string()),
        ];
        let json = self.client.get(&self.url(BY_GEOCODE_PATH), &params).await?;
        let hotels = hotel_list(&json, max_hotels);
        debug!(count = hotels.len(), "Hotels by geocode");
        Ok(hotels)
    }

    async fn hotels_by_city(&self, city_code: &str, max_hotels: usize) -> Result<Vec<Value>> {
        let city_code = city_code.trim();
        if city_code.is_empty() {
            return Err(HotelError::InvalidParams {
                reason: "city code is required".into(),
            });
        }

        let params: QueryParams = vec![
            ("cityCode".into(), city_code.to_uppercase()),
            (
                "page[limit]".into(),
                max_hotels.min(MAX_PAGE_LIMIT).to_string(),
            ),
        ];
        let json = self.client.get(&self.url(BY_CITY_PATH), &params).await?;
        let hotels = hotel_list(&json, max_hotels);
        debug!(city_code, count = hotels.len(), "Hotels by city");
        Ok(hotels)
    }

    async fn hotel_offers(&self, params: &OfferSearchParams) -> Result<Vec<BatchResult>> {
        params.validate()?;
        self.offers
            .fetch(&params.hotel_ids, &params.to_template())
            .await
    }
}
