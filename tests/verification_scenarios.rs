//! End-to-end pipeline scenarios through the public engine API.

mod common;

use common::fixtures::{DIM, basis, empty_engine, engine_with_rules, engine_with_titles, rule_set, unit};

use masthead::Embedder;
use masthead::verify::{CheckType, TitleStatus, VerifyError};

// Scenario: a configured disallowed word rejects outright, mentioning the word.
#[tokio::test]
async fn test_disallowed_word_rejects_candidate() {
    let engine = engine_with_rules(rule_set(&["fake"], &[], &[]));

    let decision = engine.verify("fake news today").await.unwrap();

    assert_eq!(decision.status, TitleStatus::Rejected);
    assert!(decision.reason.contains("fake"));
    assert_eq!(decision.similarity_score, 100.0);
    assert_eq!(decision.verification_probability, 0.0);
}

// Scenario: "daily" + an existing title is a periodicity evasion.
#[tokio::test]
async fn test_periodicity_evasion_rejected() {
    let engine = engine_with_titles(rule_set(&[], &[], &["daily"]), &["morning herald"]).await;

    let decision = engine.verify("daily morning herald").await.unwrap();

    assert_eq!(decision.status, TitleStatus::Rejected);
    assert_eq!(decision.details.len(), 1);
    assert_eq!(decision.details[0].check_type, CheckType::Periodicity);
}

// Scenario: two registered single-word titles cannot be concatenated.
#[tokio::test]
async fn test_combination_of_registered_titles_rejected() {
    let engine = engine_with_titles(rule_set(&[], &[], &[]), &["indian", "express"]).await;

    let decision = engine.verify("indian express").await.unwrap();

    assert_eq!(decision.status, TitleStatus::Rejected);
    assert_eq!(decision.details[0].check_type, CheckType::Combination);
    assert_eq!(decision.details[0].score, Some(100.0));
}

// Scenario: empty index and empty rules approve anything, then remember it.
#[tokio::test]
async fn test_fresh_corpus_approves_and_remembers() {
    let engine = empty_engine();

    let decision = engine.verify("brand new voice").await.unwrap();

    assert_eq!(decision.status, TitleStatus::Approved);
    assert_eq!(decision.similarity_score, 0.0);
    assert_eq!(decision.verification_probability, 100.0);
    assert!(engine.index().contains_exact("brand new voice"));
    assert_eq!(engine.store().len(), 1);
}

// Scenario: phonetically identical but semantically distant still rejects at 100.
#[tokio::test]
async fn test_sound_alike_rejected_despite_semantic_distance() {
    let engine = empty_engine();
    engine.index().embedder().preset("Namaskar", basis(0));
    engine.index().insert("Namaskar").await.unwrap();
    // Cosine 0.1 against the registered title: semantically unrelated.
    engine.index().embedder().preset("Namascar", unit(0, 1, 0.1));

    let decision = engine.verify("Namascar").await.unwrap();

    assert_eq!(decision.status, TitleStatus::Rejected);
    assert_eq!(decision.similarity_score, 100.0);
    let phonetic = decision
        .details
        .iter()
        .find(|d| d.check_type == CheckType::Phonetic)
        .expect("phonetic evidence expected");
    assert_eq!(phonetic.score, Some(100.0));
}

#[tokio::test]
async fn test_rule_rejection_never_invokes_the_embedder() {
    let engine = engine_with_rules(rule_set(&["banned"], &[], &[]));

    engine.verify("banned word here").await.unwrap();

    assert_eq!(engine.index().embedder().embed_calls(), 0);
}

#[tokio::test]
async fn test_probability_complements_score_for_every_decision() {
    let engine = empty_engine();
    engine.index().embedder().preset("aaaa", basis(0));
    engine.index().insert("aaaa").await.unwrap();

    for (text, w) in [("bbbb", 0.2f32), ("cccc", 0.6), ("dddd", 0.97)] {
        engine.index().embedder().preset(text, unit(0, 1, w));
        let decision = engine.verify(text).await.unwrap();
        assert!(
            (decision.verification_probability - (100.0 - decision.similarity_score)).abs() < 1e-4,
            "probability must be the exact complement for {text}"
        );
    }
}

#[tokio::test]
async fn test_cutoff_boundary_is_strict() {
    let engine = empty_engine();
    engine.index().embedder().preset("zzzz vvvv", basis(0));
    engine.index().insert("zzzz vvvv").await.unwrap();

    engine.index().embedder().preset("qqqq jjjj", unit(0, 1, 0.5));
    let at_cutoff = engine.verify("qqqq jjjj").await.unwrap();
    assert_eq!(at_cutoff.status, TitleStatus::Rejected);

    engine.index().embedder().preset("wwww kkkk", unit(0, 1, 0.49999));
    let below_cutoff = engine.verify("wwww kkkk").await.unwrap();
    assert_eq!(below_cutoff.status, TitleStatus::Approved);
}

#[tokio::test]
async fn test_whole_word_rule_matching() {
    let engine = engine_with_rules(rule_set(&["cat"], &[], &[]));

    let blocked = engine.verify("cat news").await.unwrap();
    assert_eq!(blocked.status, TitleStatus::Rejected);

    let engine = engine_with_rules(rule_set(&["cat"], &[], &[]));
    let allowed = engine.verify("category news").await.unwrap();
    assert_eq!(allowed.status, TitleStatus::Approved);
}

#[tokio::test]
async fn test_store_failure_is_a_request_level_error() {
    let engine = empty_engine();
    engine.store().set_fail_writes(true);

    let result = engine.verify("doomed title").await;

    assert!(matches!(result, Err(VerifyError::StoreWrite(_))));
}

#[tokio::test]
async fn test_rejected_candidates_are_not_registered() {
    let engine = engine_with_rules(rule_set(&["fake"], &[], &[]));

    engine.verify("fake bulletin").await.unwrap();

    assert!(!engine.index().contains_exact("fake bulletin"));
    assert!(engine.store().is_empty());
}

#[tokio::test]
async fn test_semantic_near_duplicate_rejected_with_evidence() {
    let engine = empty_engine();
    engine.index().embedder().preset("xxxx yyyy", basis(0));
    engine.index().insert("xxxx yyyy").await.unwrap();
    engine.index().embedder().preset("gggg hhhh", unit(0, 1, 0.93));

    let decision = engine.verify("gggg hhhh").await.unwrap();

    assert_eq!(decision.status, TitleStatus::Rejected);
    assert!((decision.similarity_score - 93.0).abs() < 0.01);
    assert!(decision.reason.contains("too similar"));
    let semantic = decision
        .details
        .iter()
        .find(|d| d.check_type == CheckType::Semantic)
        .expect("semantic evidence expected");
    assert_eq!(semantic.matched_title.as_deref(), Some("xxxx yyyy"));
}

#[tokio::test]
async fn test_concurrent_duplicate_approvals_create_one_entry() {
    use std::sync::Arc;

    let engine = Arc::new(empty_engine());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine.verify("contested title").await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(engine.index().len(), 1);
    assert_eq!(engine.store().len(), 1);
    assert_eq!(engine.index().all_normalized_keys().len(), 1);
}

#[tokio::test]
async fn test_search_returns_at_most_top_k_neighbors() {
    let engine = empty_engine();
    for i in 0..10 {
        engine
            .index()
            .insert(&format!("registered title {i}"))
            .await
            .unwrap();
    }

    let neighbors = engine.index().search_nearest("query", masthead::TOP_K_NEIGHBORS).await;
    assert_eq!(neighbors.len(), 5);
}

// DIM is part of the fixture contract; keep it honest.
#[test]
fn test_fixture_dimension_matches_engine() {
    let engine = empty_engine();
    assert_eq!(engine.index().embedder().dim(), DIM);
}
