//! Similarity scorer: fuses semantic neighbor search with phonetic
//! comparison into one score and an ordered explanation list.

#[cfg(test)]
mod tests;

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::constants::{PHONETIC_DETAIL_THRESHOLD, SEMANTIC_DETAIL_THRESHOLD, TOP_K_NEIGHBORS};
use crate::embedding::Embedder;
use crate::index::{HybridTitleIndex, normalize_key};
use crate::phonetic;
use crate::verify::{CheckDetail, CheckType};

/// Output of one scoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityReport {
    /// Maximum combined (semantic ∨ phonetic) score across all neighbors.
    pub score: f32,
    /// Threshold-gated evidence, strongest first.
    pub details: Vec<CheckDetail>,
}

impl SimilarityReport {
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            details: Vec::new(),
        }
    }
}

pub struct SimilarityScorer<E: Embedder> {
    index: Arc<HybridTitleIndex<E>>,
    top_k: usize,
}

impl<E: Embedder> SimilarityScorer<E> {
    pub fn new(index: Arc<HybridTitleIndex<E>>) -> Self {
        Self {
            index,
            top_k: TOP_K_NEIGHBORS,
        }
    }

    pub fn with_top_k(index: Arc<HybridTitleIndex<E>>, top_k: usize) -> Self {
        Self { index, top_k }
    }

    /// Scores `title` against its nearest indexed neighbors.
    ///
    /// A neighbor whose normalized text equals the candidate's is skipped:
    /// once a title has been inserted, its own row would otherwise dominate
    /// every later lookup. The skip is a linear pass over the top-k results
    /// only.
    #[instrument(skip(self, title), fields(title_len = title.len()))]
    pub async fn score(&self, title: &str) -> SimilarityReport {
        let neighbors = self.index.search_nearest(title, self.top_k).await;
        if neighbors.is_empty() {
            return SimilarityReport::empty();
        }

        let candidate_key = normalize_key(title);
        let mut max_score = 0.0f32;
        let mut details = Vec::new();

        for (existing, semantic) in &neighbors {
            if normalize_key(existing) == candidate_key {
                continue;
            }

            let phonetic = phonetic::compare(title, existing);
            let combined = semantic.max(phonetic.score);
            if combined > max_score {
                max_score = combined;
            }

            if *semantic > SEMANTIC_DETAIL_THRESHOLD {
                details.push(CheckDetail {
                    check_type: CheckType::Semantic,
                    description: format!("Semantically similar to registered title '{}'", existing),
                    matched_title: Some(existing.clone()),
                    matched_word: None,
                    score: Some(*semantic),
                });
            }

            if phonetic.score > PHONETIC_DETAIL_THRESHOLD {
                let description = if phonetic.exact_code_match {
                    format!("Sounds identical to registered title '{}'", existing)
                } else {
                    format!("Sounds similar to registered title '{}'", existing)
                };
                details.push(CheckDetail {
                    check_type: CheckType::Phonetic,
                    description,
                    matched_title: Some(existing.clone()),
                    matched_word: None,
                    score: Some(phonetic.score),
                });
            }
        }

        details.sort_by(|a, b| {
            b.score_or_zero()
                .partial_cmp(&a.score_or_zero())
                .unwrap_or(Ordering::Equal)
        });

        debug!(
            neighbors = neighbors.len(),
            score = max_score,
            evidence = details.len(),
            "similarity scoring complete"
        );

        SimilarityReport {
            score: max_score,
            details,
        }
    }
}
