#![no_main]
use libfuzzer_sys::fuzz_target;

use amadeus_hotels::domain::batch::BatchResult;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(response) = serde_json::from_str::<serde_json::Value>(text) {
            let batches = vec![BatchResult {
                request_ids: Vec::new(),
                response,
            }];
            let _ = amadeus_hotels::domain::offer::flatten_offers(&batches);
        }
    }
});
