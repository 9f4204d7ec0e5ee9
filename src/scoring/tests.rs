use std::sync::Arc;

use super::*;
use crate::embedding::StubEmbedder;
use crate::index::HybridTitleIndex;

const DIM: usize = 8;

fn basis(i: usize) -> Vec<f32> {
    let mut v = vec![0.0; DIM];
    v[i] = 1.0;
    v
}

/// Unit vector with cosine `w` against `basis(main)`.
fn blend(main: usize, other: usize, w: f32) -> Vec<f32> {
    let mut v = vec![0.0; DIM];
    v[main] = w;
    v[other] = (1.0 - w * w).sqrt();
    v
}

async fn index_with(titles: &[(&str, Vec<f32>)]) -> Arc<HybridTitleIndex<StubEmbedder>> {
    let stub = StubEmbedder::new(DIM);
    for (title, vector) in titles {
        stub.preset(title, vector.clone());
    }
    let index = Arc::new(HybridTitleIndex::new(stub).unwrap());
    for (title, _) in titles {
        index.insert(title).await.unwrap();
    }
    index
}

#[tokio::test]
async fn test_empty_index_scores_zero_without_embedding() {
    let index = Arc::new(HybridTitleIndex::new(StubEmbedder::new(DIM)).unwrap());
    let scorer = SimilarityScorer::new(index.clone());

    let report = scorer.score("brand new voice").await;

    assert_eq!(report.score, 0.0);
    assert!(report.details.is_empty());
    assert_eq!(index.embedder().embed_calls(), 0);
}

#[tokio::test]
async fn test_self_match_is_excluded() {
    let index = index_with(&[("brand new voice", basis(0))]).await;
    let scorer = SimilarityScorer::new(index);

    let report = scorer.score("Brand New Voice").await;

    assert_eq!(report.score, 0.0);
    assert!(report.details.is_empty());
}

#[tokio::test]
async fn test_semantic_neighbor_above_threshold_produces_detail() {
    let index = index_with(&[("morning herald", basis(0))]).await;
    index.embedder().preset("zzz qqq xxx", blend(0, 1, 0.9));
    let scorer = SimilarityScorer::new(index);

    let report = scorer.score("zzz qqq xxx").await;

    assert!((report.score - 90.0).abs() < 1e-3);
    assert_eq!(report.details.len(), 1);
    assert_eq!(report.details[0].check_type, CheckType::Semantic);
    assert_eq!(
        report.details[0].matched_title.as_deref(),
        Some("morning herald")
    );
}

#[tokio::test]
async fn test_phonetic_code_match_forces_full_score() {
    // Semantically distant (cosine 0.1) but sounds identical.
    let index = index_with(&[("Namaskar", basis(0))]).await;
    index.embedder().preset("Namascar", blend(0, 1, 0.1));
    let scorer = SimilarityScorer::new(index);

    let report = scorer.score("Namascar").await;

    assert_eq!(report.score, 100.0);
    assert_eq!(report.details[0].check_type, CheckType::Phonetic);
    assert_eq!(report.details[0].score, Some(100.0));
    assert!(report.details[0].description.contains("Sounds identical"));
}

#[tokio::test]
async fn test_details_sorted_by_score_descending() {
    let index = index_with(&[("aaaa bbbb", basis(0)), ("cccc dddd", basis(1))]).await;
    let mut q = vec![0.0; DIM];
    q[0] = 0.8;
    q[1] = 0.6;
    index.embedder().preset("eeee ffff", q);
    let scorer = SimilarityScorer::new(index);

    let report = scorer.score("eeee ffff").await;

    assert!((report.score - 80.0).abs() < 1e-3);
    assert_eq!(report.details.len(), 2);
    let scores: Vec<f32> = report.details.iter().map(|d| d.score_or_zero()).collect();
    assert!((scores[0] - 80.0).abs() < 1e-3);
    assert!((scores[1] - 60.0).abs() < 1e-3);
}

#[tokio::test]
async fn test_semantic_and_phonetic_may_both_fire_for_one_neighbor() {
    // Near-identical spelling and a close vector: both signals over threshold.
    let index = index_with(&[("daily mirror", basis(0))]).await;
    index.embedder().preset("daily mirrar", blend(0, 1, 0.85));
    let scorer = SimilarityScorer::new(index);

    let report = scorer.score("daily mirrar").await;

    let types: Vec<CheckType> = report.details.iter().map(|d| d.check_type).collect();
    assert!(types.contains(&CheckType::Semantic));
    assert!(types.contains(&CheckType::Phonetic));
}
