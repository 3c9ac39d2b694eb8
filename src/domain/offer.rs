use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::batch::BatchResult;

/// Cancellation policy value that marks an offer as non-refundable.
pub const NON_REFUNDABLE: &str = "NON_REFUNDABLE";

/// One tabular row per offer found in a batch response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlatOfferRow {
    pub hotel_id: Option<String>,
    pub check_in_date: Option<String>,
    pub nights: Option<i64>,
    pub total_price: Option<String>,
    pub currency: Option<String>,
    pub refundable: Option<bool>,
}

/// Flatten every `data[].offers[]` entry across all batches, in batch order.
///
/// Missing structure yields fewer rows or null fields, never an error.
pub fn flatten_offers(batches: &[BatchResult]) -> Vec<FlatOfferRow> {
    let mut rows = Vec::new();
    for batch in batches {
        let Some(entries) = batch.response.get("data").and_then(Value::as_array) else {
            continue;
        };
        for entry in entries {
            let hotel_id = entry
                .pointer("/hotel/hotelId")
                .and_then(Value::as_str)
                .map(String::from);
            let Some(offers) = entry.get("offers").and_then(Value::as_array) else {
                continue;
            };
            rows.extend(offers.iter().map(|offer| flatten_offer(hotel_id.clone(), offer)));
        }
    }
    rows
}

fn flatten_offer(hotel_id: Option<String>, offer: &Value) -> FlatOfferRow {
    let check_in = offer.get("checkInDate").and_then(Value::as_str);
    let check_out = offer.get("checkOutDate").and_then(Value::as_str);

    FlatOfferRow {
        hotel_id,
        check_in_date: check_in.map(String::from),
        nights: nights_between(check_in, check_out),
        total_price: offer.pointer("/price/total").and_then(scalar_to_string),
        currency: offer
            .pointer("/price/currency")
            .and_then(Value::as_str)
            .map(String::from),
        refundable: refundable_flag(offer),
    }
}

/// Calendar-day difference between two ISO dates. Unparsable input yields `None`.
pub fn nights_between(check_in: Option<&str>, check_out: Option<&str>) -> Option<i64> {
    let ci = parse_iso_date(check_in?)?;
    let co = parse_iso_date(check_out?)?;
    Some((co - ci).num_days())
}

// Strict `YYYY-MM-DD`; chrono alone would accept unpadded `2025-9-20`.
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

// Absent policy data is unknown, not "not refundable".
fn refundable_flag(offer: &Value) -> Option<bool> {
    let refundable = offer
        .get("policies")?
        .get("refundable")
        .filter(|v| !v.is_null())?;
    let policy = refundable.get("cancellationRefund").and_then(Value::as_str);
    Some(policy != Some(NON_REFUNDABLE))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
