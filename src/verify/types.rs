use serde::{Deserialize, Serialize};

use crate::constants::{APPROVAL_SIMILARITY_CUTOFF, PERCENT_SCALE};

/// Which check produced an explanation detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    DisallowedWord,
    DisallowedPrefix,
    DisallowedSuffix,
    Periodicity,
    Combination,
    Semantic,
    Phonetic,
}

/// One structured explanation record attached to a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDetail {
    pub check_type: CheckType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl CheckDetail {
    /// Score used for ordering; details without one sort last.
    #[inline]
    pub fn score_or_zero(&self) -> f32 {
        self.score.unwrap_or(0.0)
    }
}

/// Terminal verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleStatus {
    Approved,
    Rejected,
}

impl TitleStatus {
    #[inline]
    pub fn is_approved(&self) -> bool {
        matches!(self, TitleStatus::Approved)
    }
}

impl std::fmt::Display for TitleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TitleStatus::Approved => write!(f, "Approved"),
            TitleStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// The decision returned for every verification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationDecision {
    pub title: String,
    pub status: TitleStatus,
    pub reason: String,
    /// Similarity percentage, two decimals.
    pub similarity_score: f32,
    /// `100 − similarity_score`, floored at zero.
    pub verification_probability: f32,
    /// Explanation details from every stage that ran, in stage order.
    pub details: Vec<CheckDetail>,
}

impl VerificationDecision {
    /// Rejection by a lexical or combination check: similarity is reported as
    /// the maximum and the verification probability as zero.
    pub(crate) fn rejected_by_policy(
        title: &str,
        reason: String,
        details: Vec<CheckDetail>,
    ) -> Self {
        Self {
            title: title.to_string(),
            status: TitleStatus::Rejected,
            reason,
            similarity_score: PERCENT_SCALE,
            verification_probability: 0.0,
            details,
        }
    }

    /// Decision from a completed similarity stage: strict `<` cutoff for
    /// approval, applied to the computed score before reporting rounds it.
    pub(crate) fn from_similarity(title: &str, score: f32, details: Vec<CheckDetail>) -> Self {
        let approved = score < APPROVAL_SIMILARITY_CUTOFF;
        let score = round2(score);
        let probability = round2((PERCENT_SCALE - score).max(0.0));

        let (status, reason) = if approved {
            (
                TitleStatus::Approved,
                "Title is unique and follows guidelines".to_string(),
            )
        } else {
            (
                TitleStatus::Rejected,
                format!("Title is too similar to existing titles ({:.2}% match)", score),
            )
        };

        Self {
            title: title.to_string(),
            status,
            reason,
            similarity_score: score,
            verification_probability: probability,
            details,
        }
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Pipeline stages. Transitions are forward-only; a blocking check jumps
/// straight to [`VerifyStage::Decided`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStage {
    Start,
    RuleCheck,
    CombinationCheck,
    SimilarityCheck,
    Decided,
}

impl VerifyStage {
    /// The next stage in pipeline order (`Decided` is terminal).
    pub fn next(self) -> Self {
        match self {
            VerifyStage::Start => VerifyStage::RuleCheck,
            VerifyStage::RuleCheck => VerifyStage::CombinationCheck,
            VerifyStage::CombinationCheck => VerifyStage::SimilarityCheck,
            VerifyStage::SimilarityCheck | VerifyStage::Decided => VerifyStage::Decided,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyStage::Start => "start",
            VerifyStage::RuleCheck => "rule_check",
            VerifyStage::CombinationCheck => "combination_check",
            VerifyStage::SimilarityCheck => "similarity_check",
            VerifyStage::Decided => "decided",
        }
    }
}

impl std::fmt::Display for VerifyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
