use chrono::NaiveDate;

use crate::domain::batch::QueryParams;
use crate::error::{HotelError, Result};

#[derive(Debug, Clone)]
pub struct OfferSearchParams {
    pub hotel_ids: Vec<String>,
    pub check_in: NaiveDate,
    pub nights: u32,
    pub adults: u32,
    pub rooms: u32,
    pub currency: Option<String>,
}

impl OfferSearchParams {
    pub fn new(hotel_ids: Vec<String>, check_in: NaiveDate) -> Self {
        Self {
            hotel_ids,
            check_in,
            nights: 1,
            adults: 1,
            rooms: 1,
            currency: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.nights == 0 {
            return Err(HotelError::InvalidParams {
                reason: "nights must be at least 1".into(),
            });
        }
        if self.adults == 0 {
            return Err(HotelError::InvalidParams {
                reason: "adults must be at least 1".into(),
            });
        }
        if self.rooms == 0 {
            return Err(HotelError::InvalidParams {
                reason: "rooms must be at least 1".into(),
            });
        }
        if let Some(currency) = &self.currency
            && (currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(HotelError::InvalidParams {
                reason: format!("invalid currency code '{currency}', expected ISO 4217 like EUR"),
            });
        }
        if self.hotel_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(HotelError::InvalidParams {
                reason: "hotel ids must not be blank".into(),
            });
        }
        Ok(())
    }

    /// Shared query pairs for every offers chunk; `hotelIds` is added per chunk.
    pub fn to_template(&self) -> QueryParams {
        let mut params: QueryParams = vec![
            ("checkInDate".into(), self.check_in.format("%Y-%m-%d").to_string()),
            ("roomQuantity".into(), self.rooms.to_string()),
            ("adults".into(), self.adults.to_string()),
            ("paymentPolicy".into(), "NONE".into()),
            ("includeClosed".into(), "false".into()),
            ("bestRateOnly".into(), "true".into()),
            ("nights".into(), self.nights.to_string()),
        ];
        if let Some(currency) = &self.currency {
            params.push(("currency".into(), currency.to_uppercase()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> OfferSearchParams {
        OfferSearchParams::new(
            vec!["HNNCE001".into(), "HNNCE002".into()],
            NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(),
        )
    }

    #[test]
    fn default_params_are_valid() {
        assert!(params().validate().is_ok());
    }

    #[test]
    fn zero_nights_rejected() {
        let mut p = params();
        p.nights = 0;
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("nights"));
    }

    #[test]
    fn zero_adults_rejected() {
        let mut p = params();
        p.adults = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn zero_rooms_rejected() {
        let mut p = params();
        p.rooms = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn bad_currency_rejected() {
        let mut p = params();
        p.currency = Some("EURO".into());
        assert!(p.validate().is_err());
        p.currency = Some("E1R".into());
        assert!(p.validate().is_err());
        p.currency = Some("usd".into());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn blank_hotel_id_rejected() {
        let mut p = params();
        p.hotel_ids.push("  ".into());
        assert!(p.validate().is_err());
    }

    #[test]
    fn template_contains_fixed_offer_flags() {
        let mut p = params();
        p.nights = 2;
        p.currency = Some("eur".into());
        let template = p.to_template();
        let get = |key: &str| {
            template
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("checkInDate"), Some("2025-09-20"));
        assert_eq!(get("nights"), Some("2"));
        assert_eq!(get("paymentPolicy"), Some("NONE"));
        assert_eq!(get("includeClosed"), Some("false"));
        assert_eq!(get("bestRateOnly"), Some("true"));
        assert_eq!(get("currency"), Some("EUR"));
        assert_eq!(get("hotelIds"), None);
    }

    #[test]
    fn template_omits_currency_when_unset() {
        let template = params().to_template();
        assert!(template.iter().all(|(k, _)| k != "currency"));
    }
}
