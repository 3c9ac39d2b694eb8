use serde_json::Value;

/// Extract `hotelId` from hotel-list entries, skipping entries without one.
pub fn hotel_ids(hotels: &[Value]) -> Vec<String> {
    hotels
        .iter()
        .filter_map(|h| h.get("hotelId").and_then(Value::as_str))
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

/// The `data` array of a hotel-list response, truncated to `max_hotels`.
pub fn hotel_list(json: &Value, max_hotels: usize) -> Vec<Value> {
    json.get("data")
        .and_then(Value::as_array)
        .map(|data| data.iter().take(max_hotels).cloned().collect())
        .unwrap_or_default()
}
