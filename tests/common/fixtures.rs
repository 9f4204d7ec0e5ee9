//! Test fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use masthead::embedding::StubEmbedder;
use masthead::index::HybridTitleIndex;
use masthead::rules::RuleSet;
use masthead::store::MemoryTitleStore;
use masthead::verify::VerificationEngine;

pub const DIM: usize = 16;

pub type TestEngine = VerificationEngine<StubEmbedder, MemoryTitleStore>;

pub fn rule_set(words: &[&str], prefixes: &[&str], periodicity: &[&str]) -> Arc<RuleSet> {
    let to_vec = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    Arc::new(RuleSet {
        disallowed_words: to_vec(words),
        disallowed_prefixes: to_vec(prefixes),
        periodicity_words: to_vec(periodicity),
    })
}

pub fn engine_with_rules(rules: Arc<RuleSet>) -> TestEngine {
    let index = Arc::new(HybridTitleIndex::new(StubEmbedder::new(DIM)).unwrap());
    VerificationEngine::new(rules, index, MemoryTitleStore::new())
}

pub fn empty_engine() -> TestEngine {
    engine_with_rules(Arc::new(RuleSet::empty()))
}

/// Engine whose index already contains `titles` (stub-synthesized vectors).
pub async fn engine_with_titles(rules: Arc<RuleSet>, titles: &[&str]) -> TestEngine {
    let engine = engine_with_rules(rules);
    for title in titles {
        engine.index().insert(title).await.unwrap();
    }
    engine
}

/// Unit vector with cosine `w` against the `main` axis.
pub fn unit(main: usize, other: usize, w: f32) -> Vec<f32> {
    let mut v = vec![0.0; DIM];
    v[main] = w;
    v[other] = (1.0 - w * w).sqrt();
    v
}

pub fn basis(i: usize) -> Vec<f32> {
    unit(i, (i + 1) % DIM, 1.0)
}
