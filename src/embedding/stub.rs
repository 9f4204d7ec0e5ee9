//! Deterministic embedder double for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::error::EmbeddingError;
use super::Embedder;

/// Hash-seeded deterministic embedder.
///
/// Identical inputs always produce identical vectors; distinct inputs produce
/// near-orthogonal vectors at realistic dimensions. Tests can pin exact
/// vectors per text with [`StubEmbedder::preset`], count embed calls (for
/// short-circuit assertions) and inject failures (for zero-vector
/// degradation paths).
pub struct StubEmbedder {
    dim: usize,
    presets: RwLock<HashMap<String, Vec<f32>>>,
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl StubEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            presets: RwLock::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    /// Pins the vector returned for `text` (exact match).
    pub fn preset(&self, text: &str, vector: Vec<f32>) {
        assert_eq!(vector.len(), self.dim, "preset vector has wrong dimension");
        self.presets.write().insert(text.to_string(), vector);
    }

    /// Number of `embed` calls so far (failures included).
    pub fn embed_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// When set, every `embed` call fails until cleared.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn synthesize(&self, text: &str) -> Vec<f32> {
        // FNV-1a seed, then a 64-bit LCG stream mapped into [-1, 1).
        let mut state: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in text.as_bytes() {
            state ^= u64::from(*byte);
            state = state.wrapping_mul(0x0000_0100_0000_01b3);
        }

        (0..self.dim)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                ((state >> 40) as f32) / ((1u64 << 23) as f32) - 1.0
            })
            .collect()
    }
}

impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(EmbeddingError::RequestFailed {
                reason: "stub failure injected".to_string(),
            });
        }

        if let Some(vector) = self.presets.read().get(text) {
            return Ok(vector.clone());
        }

        Ok(self.synthesize(text))
    }

    fn dim(&self) -> usize {
        self.dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_is_deterministic() {
        let stub = StubEmbedder::new(8);
        let a = stub.embed("morning herald").await.unwrap();
        let b = stub.embed("morning herald").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[tokio::test]
    async fn test_stub_distinct_inputs_differ() {
        let stub = StubEmbedder::new(8);
        let a = stub.embed("morning herald").await.unwrap();
        let b = stub.embed("evening gazette").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_stub_counts_calls_and_fails_on_demand() {
        let stub = StubEmbedder::new(4);
        assert_eq!(stub.embed_calls(), 0);

        stub.embed("x").await.unwrap();
        stub.set_fail(true);
        assert!(stub.embed("y").await.is_err());
        assert_eq!(stub.embed_calls(), 2);
    }

    #[tokio::test]
    async fn test_stub_preset_overrides_synthesis() {
        let stub = StubEmbedder::new(3);
        stub.preset("pinned", vec![1.0, 0.0, 0.0]);
        assert_eq!(stub.embed("pinned").await.unwrap(), vec![1.0, 0.0, 0.0]);
    }
}
