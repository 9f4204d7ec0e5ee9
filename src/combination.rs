//! Combination detector.
//!
//! A two-word candidate that is the literal concatenation of two registered
//! single-word titles is blocked outright.

use std::sync::Arc;

use crate::constants::PERCENT_SCALE;
use crate::index::TitleLookup;
use crate::verify::{CheckDetail, CheckType};

pub struct CombinationDetector<L: TitleLookup> {
    index: Arc<L>,
}

impl<L: TitleLookup> CombinationDetector<L> {
    pub fn new(index: Arc<L>) -> Self {
        Self { index }
    }

    /// Fires only when the candidate splits into exactly two tokens, both of
    /// which are registered titles on their own.
    pub fn check(&self, title: &str) -> Option<CheckDetail> {
        let t = title.to_lowercase();
        let words: Vec<&str> = t.split_whitespace().collect();

        if words.len() != 2 {
            return None;
        }

        if !(self.index.contains_exact(words[0]) && self.index.contains_exact(words[1])) {
            return None;
        }

        Some(CheckDetail {
            check_type: CheckType::Combination,
            description: format!(
                "Combination of existing titles: '{}' and '{}'",
                words[0], words[1]
            ),
            matched_title: None,
            matched_word: None,
            score: Some(PERCENT_SCALE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::StaticLookup;

    fn detector(titles: &[&str]) -> CombinationDetector<StaticLookup> {
        CombinationDetector::new(Arc::new(StaticLookup::from_titles(titles.iter().copied())))
    }

    #[test]
    fn test_blocks_two_word_concatenation() {
        let detail = detector(&["indian", "express"])
            .check("Indian Express")
            .expect("combination should be detected");
        assert_eq!(detail.check_type, CheckType::Combination);
        assert_eq!(detail.score, Some(100.0));
    }

    #[test]
    fn test_ignores_when_either_token_unregistered() {
        let d = detector(&["indian"]);
        assert!(d.check("indian express").is_none());
    }

    #[test]
    fn test_only_fires_on_exactly_two_tokens() {
        let d = detector(&["indian", "express", "daily"]);
        assert!(d.check("indian").is_none());
        assert!(d.check("daily indian express").is_none());
    }
}
