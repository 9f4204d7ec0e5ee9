//! Hybrid title index: exact-match key set + nearest-neighbor vector store.
//!
//! Three parallel structures live under one lock: the ordinal title
//! sequence, the NormalizedKey set and the vector store. Row `i` of the
//! vector store is the vector of `titles[i]`; `insert` appends to all three
//! under the write lock so readers never observe them out of step.
//!
//! Embedding calls are the dominant latency cost and always happen outside
//! the lock. Writes are serialized behind the single writer lock; reads run
//! concurrently under the shared lock.

pub mod error;
pub mod flat;
pub mod snapshot;


pub use error::{IndexError, IndexResult};
pub use flat::{FlatVectorStore, l2_normalize};
pub use snapshot::{SnapshotPaths, SnapshotRecord, TitleSnapshot};

use std::collections::HashSet;

use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::constants::{DimValidationError, PERCENT_SCALE};
use crate::embedding::Embedder;
use crate::store::TitleStore;

/// O(1) case-insensitive membership, the slice of the index the rule filter
/// and combination detector need. Kept narrow so tests can substitute a
/// plain set.
pub trait TitleLookup: Send + Sync {
    fn contains_exact(&self, text: &str) -> bool;
}

/// Lowercased, trimmed form of a title used for exact matching.
pub fn normalize_key(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Counts reported by [`HybridTitleIndex::hydrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HydrationSummary {
    /// Titles loaded from the snapshot files.
    pub snapshot_loaded: usize,
    /// Record-store approvals absent from the snapshot, embedded and appended.
    pub reconciled: usize,
}

struct IndexInner {
    titles: Vec<String>,
    keys: HashSet<String>,
    vectors: FlatVectorStore,
}

/// The corpus of approved titles, searchable two ways.
pub struct HybridTitleIndex<E: Embedder> {
    embedder: E,
    inner: RwLock<IndexInner>,
}

impl<E: Embedder> std::fmt::Debug for HybridTitleIndex<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridTitleIndex")
            .field("entries", &self.len())
            .field("dim", &self.embedder.dim())
            .finish()
    }
}

impl<E: Embedder> HybridTitleIndex<E> {
    pub fn new(embedder: E) -> IndexResult<Self> {
        let dim = embedder.dim();
        if dim == 0 {
            return Err(DimValidationError::ZeroDimension.into());
        }

        Ok(Self {
            embedder,
            inner: RwLock::new(IndexInner {
                titles: Vec::new(),
                keys: HashSet::new(),
                vectors: FlatVectorStore::new(dim),
            }),
        })
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn len(&self) -> usize {
        self.inner.read().titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().titles.is_empty()
    }

    /// Case-insensitive membership, O(1).
    pub fn contains_exact(&self, text: &str) -> bool {
        self.inner.read().keys.contains(&normalize_key(text))
    }

    /// Point-in-time copy of the NormalizedKey set.
    pub fn all_normalized_keys(&self) -> HashSet<String> {
        self.inner.read().keys.clone()
    }

    /// Embeds `text` and returns up to `k` `(title, score)` neighbors by
    /// descending cosine similarity, as percentages clamped to 100.
    ///
    /// An empty index returns an empty list without calling the embedder.
    #[instrument(skip(self, text), fields(text_len = text.len(), k = k))]
    pub async fn search_nearest(&self, text: &str, k: usize) -> Vec<(String, f32)> {
        if self.is_empty() {
            return Vec::new();
        }

        let query = self.embed_normalized(text).await;

        let inner = self.inner.read();
        let results: Vec<(String, f32)> = inner
            .vectors
            .search(&query, k)
            .into_iter()
            .map(|(ordinal, ip)| {
                (
                    inner.titles[ordinal].clone(),
                    (ip * PERCENT_SCALE).min(PERCENT_SCALE),
                )
            })
            .collect();

        debug!(neighbors = results.len(), "nearest-neighbor search complete");
        results
    }

    /// Embeds and appends `text`. Returns `false` (and does nothing) when the
    /// normalized key is already present.
    ///
    /// Concurrent duplicate approvals resolve to exactly one entry: the
    /// second caller re-checks the key under the write lock, after the first
    /// caller's mutation is visible.
    pub async fn insert(&self, text: &str) -> IndexResult<bool> {
        let key = normalize_key(text);
        if key.is_empty() || self.inner.read().keys.contains(&key) {
            return Ok(false);
        }

        let vector = self.embed_normalized(text).await;

        let mut inner = self.inner.write();
        if inner.keys.contains(&key) {
            return Ok(false);
        }

        // Vector row first: it is the only fallible append, and the three
        // structures must never disagree on length.
        inner.vectors.push(&vector)?;
        inner.titles.push(text.trim().to_string());
        inner.keys.insert(key);

        Ok(true)
    }

    /// Startup hydration: load the snapshot (absent snapshot → empty index,
    /// logged), then reconcile against the record store by appending every
    /// approved title whose key is not yet present.
    ///
    /// Reconciliation is idempotent by NormalizedKey, which also makes an
    /// index entry written ahead of a failed store write harmless.
    #[instrument(skip(self, paths, store))]
    pub async fn hydrate<S: TitleStore>(
        &self,
        paths: &SnapshotPaths,
        store: &S,
    ) -> IndexResult<HydrationSummary> {
        let mut summary = HydrationSummary::default();

        match TitleSnapshot::load(paths, self.embedder.dim()) {
            Ok(snap) => {
                summary.snapshot_loaded = snap.titles.len();
                self.load_snapshot(snap);
                info!(titles = summary.snapshot_loaded, "index snapshot loaded");
            }
            Err(IndexError::SnapshotMissing { path }) => {
                warn!(path = %path.display(), "index snapshot missing, starting with an empty index");
            }
            Err(e) => return Err(e),
        }

        let approved = store
            .list_approved_titles()
            .await
            .map_err(|e| IndexError::ReconcileFailed {
                reason: e.to_string(),
            })?;

        for title in approved {
            if !self.contains_exact(&title) && self.insert(&title).await? {
                summary.reconciled += 1;
            }
        }

        if summary.reconciled > 0 {
            info!(
                injected = summary.reconciled,
                "record-store approvals injected into the vector index"
            );
        }

        Ok(summary)
    }

    fn load_snapshot(&self, snap: TitleSnapshot) {
        let keys = snap.titles.iter().map(|t| normalize_key(t)).collect();
        let mut inner = self.inner.write();
        inner.vectors = FlatVectorStore::from_parts(snap.dim, snap.vectors);
        inner.titles = snap.titles;
        inner.keys = keys;
    }

    /// Embeds and L2-normalizes. A failed or mis-sized provider response
    /// degrades to a zero vector for this request instead of failing it.
    async fn embed_normalized(&self, text: &str) -> Vec<f32> {
        let dim = self.embedder.dim();
        let mut vector = match self.embedder.embed(text).await {
            Ok(v) if v.len() == dim => v,
            Ok(v) => {
                warn!(
                    expected = dim,
                    actual = v.len(),
                    "embedding dimension mismatch, substituting zero vector"
                );
                vec![0.0; dim]
            }
            Err(e) => {
                warn!(error = %e, "embedding unavailable, substituting zero vector");
                vec![0.0; dim]
            }
        };
        l2_normalize(&mut vector);
        vector
    }
}

impl<E: Embedder> TitleLookup for HybridTitleIndex<E> {
    fn contains_exact(&self, text: &str) -> bool {
        HybridTitleIndex::contains_exact(self, text)
    }
}

/// Set-backed [`TitleLookup`] double for rule/combination tests.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    keys: HashSet<String>,
}

#[cfg(any(test, feature = "mock"))]
impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_titles<I, T>(titles: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            keys: titles
                .into_iter()
                .map(|t| normalize_key(t.as_ref()))
                .collect(),
        }
    }
}

#[cfg(any(test, feature = "mock"))]
impl TitleLookup for StaticLookup {
    fn contains_exact(&self, text: &str) -> bool {
        self.keys.contains(&normalize_key(text))
    }
}
