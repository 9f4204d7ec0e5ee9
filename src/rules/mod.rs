//! Lexical rule checks: disallowed words, disallowed prefixes/suffixes and
//! periodicity-strip lookups against the title index.
//!
//! Every check runs even after a violation is found, so a decision carries
//! all violations, not just the first.

pub mod error;


pub use error::RuleSetError;

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::constants::PERCENT_SCALE;
use crate::index::TitleLookup;
use crate::verify::{CheckDetail, CheckType};

/// Rule configuration, loaded once at startup and immutable thereafter.
///
/// All entries are normalized to lowercase on load; matching treats titles as
/// space-delimited token streams.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub disallowed_words: Vec<String>,
    #[serde(default)]
    pub disallowed_prefixes: Vec<String>,
    #[serde(default)]
    pub periodicity_words: Vec<String>,
}

impl RuleSet {
    /// A rule set that rejects nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads and normalizes a rules document.
    ///
    /// A missing file is reported as [`RuleSetError::Missing`] so the caller
    /// can degrade to [`RuleSet::empty`] explicitly rather than silently.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RuleSetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RuleSetError::Missing {
                path: path.to_path_buf(),
            });
        }

        let raw = std::fs::read_to_string(path)?;
        let rules: RuleSet = serde_json::from_str(&raw)?;
        Ok(rules.normalized())
    }

    fn normalized(self) -> Self {
        let clean = |list: Vec<String>| {
            list.into_iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        };

        Self {
            disallowed_words: clean(self.disallowed_words),
            disallowed_prefixes: clean(self.disallowed_prefixes),
            periodicity_words: clean(self.periodicity_words),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.disallowed_words.is_empty()
            && self.disallowed_prefixes.is_empty()
            && self.periodicity_words.is_empty()
    }
}

/// Result of running the rule filter over one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub blocked: bool,
    /// First violation found, in check order.
    pub reason: Option<String>,
    /// Every violation found, in check order.
    pub details: Vec<CheckDetail>,
}

/// Applies a [`RuleSet`] to candidate titles, consulting the index for
/// periodicity-strip lookups.
pub struct RuleFilter<L: TitleLookup> {
    rules: Arc<RuleSet>,
    index: Arc<L>,
}

impl<L: TitleLookup> RuleFilter<L> {
    pub fn new(rules: Arc<RuleSet>, index: Arc<L>) -> Self {
        Self { rules, index }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Runs all three checks over `title`, collecting every violation.
    ///
    /// The periodicity check removes every occurrence of every matched marker
    /// before the lookup, so a marker that is also meaningful content is
    /// stripped along with the rest.
    pub fn check(&self, title: &str) -> RuleOutcome {
        let t = title.trim().to_lowercase();
        let padded = format!(" {} ", t);
        let mut details = Vec::new();

        for word in &self.rules.disallowed_words {
            if padded.contains(&format!(" {} ", word)) {
                details.push(CheckDetail {
                    check_type: CheckType::DisallowedWord,
                    description: format!("Contains disallowed word: '{}'", word),
                    matched_title: None,
                    matched_word: Some(word.clone()),
                    score: Some(PERCENT_SCALE),
                });
            }
        }

        for affix in &self.rules.disallowed_prefixes {
            if t.starts_with(&format!("{} ", affix)) {
                details.push(CheckDetail {
                    check_type: CheckType::DisallowedPrefix,
                    description: format!("Disallowed prefix: '{}'", affix),
                    matched_title: None,
                    matched_word: Some(affix.clone()),
                    score: Some(PERCENT_SCALE),
                });
            }
            if t.ends_with(&format!(" {}", affix)) {
                details.push(CheckDetail {
                    check_type: CheckType::DisallowedSuffix,
                    description: format!("Disallowed suffix: '{}'", affix),
                    matched_title: None,
                    matched_word: Some(affix.clone()),
                    score: Some(PERCENT_SCALE),
                });
            }
        }

        if let Some(detail) = self.check_periodicity(&t, &padded) {
            details.push(detail);
        }

        let blocked = !details.is_empty();
        let reason = details.first().map(|d| d.description.clone());

        if blocked {
            debug!(violations = details.len(), "rule filter blocked candidate");
        }

        RuleOutcome {
            blocked,
            reason,
            details,
        }
    }

    /// A marker present as a bounded token (start, interior or end) is
    /// stripped — all occurrences of all found markers — and the remainder is
    /// looked up against registered titles.
    fn check_periodicity(&self, t: &str, padded: &str) -> Option<CheckDetail> {
        let found: Vec<&String> = self
            .rules
            .periodicity_words
            .iter()
            .filter(|marker| padded.contains(&format!(" {} ", marker)))
            .collect();

        if found.is_empty() {
            return None;
        }

        let mut stripped = t.to_string();
        for marker in &found {
            stripped = stripped.replace(marker.as_str(), "");
        }
        let stripped = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

        if stripped.is_empty() || !self.index.contains_exact(&stripped) {
            return None;
        }

        Some(CheckDetail {
            check_type: CheckType::Periodicity,
            description: format!(
                "Cannot form a new title by adding periodicity '{}' to existing title '{}'",
                found[0], stripped
            ),
            matched_title: Some(stripped),
            matched_word: Some(found[0].clone()),
            score: Some(PERCENT_SCALE),
        })
    }
}
