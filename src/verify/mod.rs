//! Verification orchestrator.
//!
//! Stages run in strict order — rule filter, combination detector,
//! similarity scorer — short-circuiting to a rejection at the first blocking
//! stage. The similarity search is the only stage that embeds, so it must
//! never run once a cheaper stage has rejected.

pub mod error;
pub mod types;


pub use error::VerifyError;
pub use types::{CheckDetail, CheckType, TitleStatus, VerificationDecision, VerifyStage};

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::combination::CombinationDetector;
use crate::embedding::Embedder;
use crate::index::{HybridTitleIndex, HydrationSummary, IndexResult, SnapshotPaths};
use crate::rules::{RuleFilter, RuleSet};
use crate::scoring::SimilarityScorer;
use crate::store::{InsertOutcome, TitleStore};

/// The verification pipeline over a shared index and record store.
///
/// All collaborators are constructor-injected; there is no process-wide
/// state.
pub struct VerificationEngine<E: Embedder, S: TitleStore> {
    rules: Arc<RuleSet>,
    rule_filter: RuleFilter<HybridTitleIndex<E>>,
    combinations: CombinationDetector<HybridTitleIndex<E>>,
    scorer: SimilarityScorer<E>,
    index: Arc<HybridTitleIndex<E>>,
    store: S,
}

impl<E: Embedder, S: TitleStore> std::fmt::Debug for VerificationEngine<E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationEngine")
            .field("indexed_titles", &self.index.len())
            .field("rules_empty", &self.rules.is_empty())
            .finish_non_exhaustive()
    }
}

impl<E: Embedder, S: TitleStore> VerificationEngine<E, S> {
    pub fn new(rules: Arc<RuleSet>, index: Arc<HybridTitleIndex<E>>, store: S) -> Self {
        Self {
            rule_filter: RuleFilter::new(rules.clone(), index.clone()),
            combinations: CombinationDetector::new(index.clone()),
            scorer: SimilarityScorer::new(index.clone()),
            rules,
            index,
            store,
        }
    }

    pub fn index(&self) -> &Arc<HybridTitleIndex<E>> {
        &self.index
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Startup hydration: snapshot load plus record-store reconciliation.
    pub async fn hydrate(&self, paths: &SnapshotPaths) -> IndexResult<HydrationSummary> {
        self.index.hydrate(paths, &self.store).await
    }

    /// Runs the full pipeline for one candidate and, on approval, registers
    /// it (index row first, then the durable record; the next hydration pass
    /// repairs a store failure, never the reverse).
    #[instrument(skip(self, title), fields(title = %title))]
    pub async fn verify(&self, title: &str) -> Result<VerificationDecision, VerifyError> {
        let mut stage = VerifyStage::Start;

        stage = stage.next();
        let outcome = self.rule_filter.check(title);
        if outcome.blocked {
            info!(stage = stage.as_str(), "candidate rejected");
            return Ok(VerificationDecision::rejected_by_policy(
                title,
                outcome.reason.unwrap_or_default(),
                outcome.details,
            ));
        }

        stage = stage.next();
        if let Some(detail) = self.combinations.check(title) {
            info!(stage = stage.as_str(), "candidate rejected");
            return Ok(VerificationDecision::rejected_by_policy(
                title,
                detail.description.clone(),
                vec![detail],
            ));
        }

        stage = stage.next();
        let report = self.scorer.score(title).await;
        let decision = VerificationDecision::from_similarity(title, report.score, report.details);

        stage = stage.next();
        debug_assert_eq!(stage, VerifyStage::Decided);

        if decision.status.is_approved() {
            self.register(title).await?;
        }

        info!(
            stage = stage.as_str(),
            status = %decision.status,
            score = decision.similarity_score,
            "verification decided"
        );
        Ok(decision)
    }

    async fn register(&self, title: &str) -> Result<(), VerifyError> {
        // A no-op insert means this normalized title is already registered; a
        // second record would break the one-Title-per-IndexEntry pairing.
        if !self.index.insert(title).await? {
            debug!("title already indexed, skipping store write");
            return Ok(());
        }

        match self.store.insert_title(title).await? {
            InsertOutcome::Inserted(id) => debug!(id, "title persisted"),
            InsertOutcome::Duplicate => debug!("title already persisted"),
        }

        Ok(())
    }
}
