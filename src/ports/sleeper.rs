use std::time::Duration;

use async_trait::async_trait;

/// Where retry delays are spent. Swapped for a recording clock in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
