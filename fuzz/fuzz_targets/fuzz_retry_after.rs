#![no_main]
use libfuzzer_sys::fuzz_target;

use amadeus_hotels::adapters::http::retry::RetryPolicy;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let policy = RetryPolicy::default();
        for attempt in 0..4 {
            let _ = policy.rate_limit_delay(Some(text), attempt);
        }
    }
});
