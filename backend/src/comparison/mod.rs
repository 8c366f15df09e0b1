//! Subject-name fuzzy matching and curriculum difference engine.
//!
//! Everything in here is a pure function of its inputs: no I/O, no shared
//! state. Callers load the subject registry and plan rows and hand them in.

pub mod difference;
pub mod ngram;
pub mod subjects;
pub mod text;

use serde::Deserialize;

pub use difference::{Curriculum, DifferenceEngine};
pub use subjects::SubjectMatcher;

/// Thresholds shared by the matcher and the difference engine.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Tokens shorter than this (before normalization) are ignored.
    pub min_word_length: usize,
    pub ngram_length: usize,
    /// Minimal Tanimoto coefficient for two words to count as equal.
    pub word_threshold: f64,
    /// Minimal subject similarity for a course to be considered a transfer
    /// candidate. Compared with `>`.
    pub sensitivity: f64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            ngram_length: 2,
            word_threshold: 0.45,
            sensitivity: 0.3,
        }
    }
}

impl MatchSettings {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ngram_length == 0 {
            anyhow::bail!("comparison.ngram_length must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.word_threshold) {
            anyhow::bail!("comparison.word_threshold must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.sensitivity) {
            anyhow::bail!("comparison.sensitivity must be within [0, 1]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(MatchSettings::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_ngram_and_out_of_range_thresholds() {
        let zero_gram = MatchSettings {
            ngram_length: 0,
            ..Default::default()
        };
        assert!(zero_gram.validate().is_err());

        let word = MatchSettings {
            word_threshold: 1.5,
            ..Default::default()
        };
        assert!(word.validate().is_err());

        let sensitivity = MatchSettings {
            sensitivity: -0.1,
            ..Default::default()
        };
        assert!(sensitivity.validate().is_err());
    }
}
