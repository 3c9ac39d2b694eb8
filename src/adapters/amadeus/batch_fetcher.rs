use std::sync::Arc;

use tracing::debug;

use crate::adapters::http::client::ResilientHttpClient;
use crate::domain::batch::{BatchResult, MAX_CHUNK_SIZE, QueryParams, chunk_ids, chunk_params};
use crate::error::Result;

/// Query key carrying a chunk's comma-joined ids.
pub const HOTEL_IDS_KEY: &str = "hotelIds";

/// Fans an id list out into bounded chunks, one GET per chunk.
///
/// Chunks are fetched strictly in order, each awaited before the next, so
/// they share one token and one rate-limit budget. The first failing chunk
/// aborts the whole fetch.
pub struct BatchFetcher {
    client: Arc<ResilientHttpClient>,
    url: String,
    id_key: String,
    chunk_size: usize,
}

impl BatchFetcher {
    pub fn new(client: Arc<ResilientHttpClient>, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            id_key: HOTEL_IDS_KEY.into(),
            chunk_size: MAX_CHUNK_SIZE,
        }
    }

    /// Override the chunk size. Values above the upstream limit are clamped.
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.clamp(1, MAX_CHUNK_SIZE);
        self
    }

    pub async fn fetch(
        &self,
        ids: &[String],
        template: &QueryParams,
    ) -> Result<Vec<BatchResult>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let chunks = chunk_ids(ids, self.chunk_size);
        let total = chunks.len();
        let mut batches = Vec::with_capacity(total);
        for (index, chunk) in chunks.into_iter().enumerate() {
            debug!(
                chunk = index + 1,
                total,
                ids = chunk.ids.len(),
                "Fetching batch"
            );
            let params = chunk_params(&self.id_key, &chunk, template);
            let response = self.client.get(&self.url, &params).await?;
            batches.push(BatchResult {
                request_ids: chunk.ids,
                response,
            });
        }
        Ok(batches)
    }
}
