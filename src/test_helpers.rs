use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::batch::BatchResult;
use crate::domain::search_params::OfferSearchParams;
use crate::error::Result;
use crate::ports::hotel_api::HotelApi;

type GeocodeFn = Box<dyn Fn(f64, f64, u32, usize) -> Result<Vec<Value>> + Send + Sync>;
type CityFn = Box<dyn Fn(&str, usize) -> Result<Vec<Value>> + Send + Sync>;
type OffersFn = Box<dyn Fn(&OfferSearchParams) -> Result<Vec<BatchResult>> + Send + Sync>;

pub struct MockHotelApi {
    geocode_fn: Mutex<GeocodeFn>,
    city_fn: Mutex<CityFn>,
    offers_fn: Mutex<OffersFn>,
}

impl Default for MockHotelApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHotelApi {
    pub fn new() -> Self {
        Self {
            geocode_fn: Mutex::new(Box::new(|_, _, _, _| Ok(vec![]))),
            city_fn: Mutex::new(Box::new(|_, _| Ok(vec![]))),
            offers_fn: Mutex::new(Box::new(|_| Ok(vec![]))),
        }
    }

    #[must_use]
    pub fn with_geocode(
        self,
        f: impl Fn(f64, f64, u32, usize) -> Result<Vec<Value>> + Send + Sync + 'static,
    ) -> Self {
        *self.geocode_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_city(
        self,
        f: impl Fn(&str, usize) -> Result<Vec<Value>> + Send + Sync + 'static,
    ) -> Self {
        *self.city_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_offers(
        self,
        f: impl Fn(&OfferSearchParams) -> Result<Vec<BatchResult>> + Send + Sync + 'static,
    ) -> Self {
        *self.offers_fn.lock().unwrap() = Box::new(f);
        self
    }
}

#[async_trait]
impl HotelApi for MockHotelApi {
    async fn hotels_by_geocode(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: u32,
        max_hotels: usize,
    ) -> Result<Vec<Value>> {
        (self.geocode_fn.lock().unwrap())(latitude, longitude, radius_km, max_hotels)
    }

    async fn hotels_by_city(&self, city_code: &str, max_hotels: usize) -> Result<Vec<Value>> {
        (self.city_fn.lock().unwrap())(city_code, max_hotels)
    }

    async fn hotel_offers(&self, params: &OfferSearchParams) -> Result<Vec<BatchResult>> {
        (self.offers_fn.lock().unwrap())(params)
    }
}

pub fn make_hotel(id: &str) -> Value {
    json!({
        "chainCode": "XX",
        "name": format!("Hotel {id}"),
        "hotelId": id,
        "geoCode": {"latitude": 43.7, "longitude": 7.26}
    })
}

/// One batch with a single priced offer per hotel id.
pub fn make_offers_batch(ids: &[String], check_in: &str, check_out: &str) -> BatchResult {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "type": "hotel-offers",
                "hotel": {"hotelId": id},
                "available": true,
                "offers": [{
                    "checkInDate": check_in,
                    "checkOutDate": check_out,
                    "price": {"currency": "EUR", "total": "120.00"},
                    "policies": {"refundable": {"cancellationRefund": "REFUNDABLE_UP_TO_DEADLINE"}}
                }]
            })
        })
        .collect();
    BatchResult {
        request_ids: ids.to_vec(),
        response: json!({"data": data}),
    }
}
