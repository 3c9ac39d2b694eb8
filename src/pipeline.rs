use chrono::{Days, NaiveDate};
use tracing::info;

use crate::config::types::SearchConfig;
use crate::domain::batch::BatchResult;
use crate::domain::hotel::hotel_ids;
use crate::domain::offer::{FlatOfferRow, flatten_offers};
use crate::domain::search_params::OfferSearchParams;
use crate::error::{HotelError, Result};
use crate::ports::hotel_api::HotelApi;

/// Everything one run produced, from the hotel lookup to flattened rows.
#[derive(Debug, Clone)]
pub struct OfferRun {
    pub hotel_ids: Vec<String>,
    pub batches: Vec<BatchResult>,
    pub rows: Vec<FlatOfferRow>,
}

/// Hotels by city (when configured) or geocode, then offers for the first
/// `max_offer_hotels` of them, flattened.
pub async fn fetch_offer_rows(
    api: &dyn HotelApi,
    search: &SearchConfig,
    today: NaiveDate,
) -> Result<OfferRun> {
    let hotels = match search.city_code.as_deref() {
        Some(city) => api.hotels_by_city(city, search.max_hotels).await?,
        None => {
            api.hotels_by_geocode(
                search.latitude,
                search.longitude,
                search.radius_km,
                search.max_hotels,
            )
            .await?
        }
    };
    let ids = hotel_ids(&hotels);
    info!(hotels = hotels.len(), ids = ids.len(), "Hotels found");

    let check_in = today
        .checked_add_days(Days::new(u64::from(search.check_in_offset_days)))
        .ok_or_else(|| HotelError::InvalidParams {
            reason: format!(
                "check-in offset of {} days is out of range",
                search.check_in_offset_days
            ),
        })?;
    let offer_ids: Vec<String> = ids.iter().take(search.max_offer_hotels).cloned().collect();
    let params = OfferSearchParams {
        hotel_ids: offer_ids,
        check_in,
        nights: search.nights,
        adults: search.adults,
        rooms: search.rooms,
        currency: search.currency.clone(),
    };

    let batches = api.hotel_offers(&params).await?;
    let rows = flatten_offers(&batches);
    info!(batches = batches.len(), rows = rows.len(), "Offers fetched");

    Ok(OfferRun {
        hotel_ids: ids,
        batches,
        rows,
    })
}
