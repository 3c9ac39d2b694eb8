use serde::{Deserialize, Serialize};

/// Upstream per-request cardinality limit for `hotelIds`.
pub const MAX_CHUNK_SIZE: usize = 20;

/// Ordered `(key, value)` query pairs used as a request template.
pub type QueryParams = Vec<(String, String)>;

/// A bounded, order-preserving slice of the requested ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRequest {
    pub ids: Vec<String>,
}

impl ChunkRequest {
    pub fn joined(&self) -> String {
        self.ids.join(",")
    }
}

/// One chunk's requested ids paired with the raw upstream response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchResult {
    pub request_ids: Vec<String>,
    pub response: serde_json::Value,
}

/// Partition `ids` into consecutive chunks of at most `size` ids.
///
/// Concatenating the chunks yields `ids` unchanged. A `size` of zero is
/// treated as one.
pub fn chunk_ids(ids: &[String], size: usize) -> Vec<ChunkRequest> {
    ids.chunks(size.max(1))
        .map(|c| ChunkRequest { ids: c.to_vec() })
        .collect()
}

/// Build a chunk's query: `key=<joined ids>` followed by the template pairs.
/// Template pairs using `key` are dropped so the chunk's ids always win.
pub fn chunk_params(key: &str, chunk: &ChunkRequest, template: &QueryParams) -> QueryParams {
    let mut params = Vec::with_capacity(template.len() + 1);
    params.push((key.to_string(), chunk.joined()));
    params.extend(template.iter().filter(|(k, _)| k != key).cloned());
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("H{i:03}")).collect()
    }

    #[test]
    fn chunk_empty_input() {
        assert!(chunk_ids(&[], MAX_CHUNK_SIZE).is_empty());
    }

    #[test]
    fn chunk_exact_multiple() {
        let chunks = chunk_ids(&ids(40), MAX_CHUNK_SIZE);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.ids.len() == 20));
    }

    #[test]
    fn chunk_last_shorter() {
        let input = ids(45);
        let chunks = chunk_ids(&input, MAX_CHUNK_SIZE);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].ids.len(), 5);
        let flat: Vec<String> = chunks.into_iter().flat_map(|c| c.ids).collect();
        assert_eq!(flat, input);
    }

    #[test]
    fn chunk_zero_size_falls_back_to_one() {
        let chunks = chunk_ids(&ids(3), 0);
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn chunk_joined_is_comma_separated() {
        let chunk = ChunkRequest {
            ids: vec!["A".into(), "B".into(), "C".into()],
        };
        assert_eq!(chunk.joined(), "A,B,C");
    }

    #[test]
    fn chunk_params_puts_ids_first_and_overrides_template() {
        let chunk = ChunkRequest {
            ids: vec!["A".into(), "B".into()],
        };
        let template: QueryParams = vec![
            ("hotelIds".into(), "stale".into()),
            ("adults".into(), "2".into()),
        ];
        let params = chunk_params("hotelIds", &chunk, &template);
        assert_eq!(
            params,
            vec![
                ("hotelIds".to_string(), "A,B".to_string()),
                ("adults".to_string(), "2".to_string()),
            ]
        );
    }
}
