//! Estimator configuration with documented defaults.
//!
//! The Kasiski noise-filter thresholds are heuristics, not constants of
//! the algorithm; historical implementations disagree about their
//! "correct" values. They are therefore exposed as configuration with
//! the defaults that have worked well on prose-length ciphertext.

use serde::{Deserialize, Serialize};

use crate::{CipherlabError, Result};

/// Largest n-gram length whose base-26 encoding fits in a `u64`
/// (`26^13 < 2^64`).
pub const MAX_NGRAM_LEN: usize = 13;

// ---------------------------------------------------------------------------
// KasiskiConfig
// ---------------------------------------------------------------------------

/// Tunable parameters of the Kasiski key-length estimator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KasiskiConfig {
    /// Length of the repeated n-grams to index. Trigram repetitions are
    /// the classical choice; longer n-grams repeat less often but carry
    /// a stronger signal.
    pub ngram_len: usize,

    /// Distances below this are discarded as statistical noise
    /// (short-range repeats are usually coincidence, not key period).
    pub min_distance: usize,

    /// Largest key length that may receive votes. Candidates are drawn
    /// from `2..=max_candidate`.
    pub max_candidate: usize,
}

impl Default for KasiskiConfig {
    fn default() -> Self {
        Self {
            ngram_len: 3,
            min_distance: 40,
            max_candidate: 30,
        }
    }
}

impl KasiskiConfig {
    /// Validates all configuration values.
    ///
    /// Returns an error if any value is outside its acceptable range.
    pub fn validate(&self) -> Result<()> {
        if self.ngram_len < 2 || self.ngram_len > MAX_NGRAM_LEN {
            return Err(CipherlabError::ConfigError {
                reason: format!("ngram_len must be 2..={MAX_NGRAM_LEN}"),
            });
        }

        if self.min_distance == 0 {
            return Err(CipherlabError::ConfigError {
                reason: "min_distance must be greater than 0".into(),
            });
        }

        if self.max_candidate < 2 {
            return Err(CipherlabError::ConfigError {
                reason: "max_candidate must be at least 2".into(),
            });
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// IcConfig
// ---------------------------------------------------------------------------

/// Tunable parameters of the Index-of-Coincidence estimator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IcConfig {
    /// Largest key length to score. Lengths `1..=max_candidate` are all
    /// evaluated; length 1 corresponds to a monoalphabetic cipher.
    pub max_candidate: usize,
}

impl Default for IcConfig {
    fn default() -> Self {
        Self { max_candidate: 30 }
    }
}

impl IcConfig {
    /// Validates all configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.max_candidate == 0 {
            return Err(CipherlabError::ConfigError {
                reason: "max_candidate must be at least 1".into(),
            });
        }
        Ok(())
    }
}
