//! Core shared types for the cipherlab classical-cipher toolkit.
//!
//! This crate defines all fundamental types used across the workspace.
//! No other crate should define shared types — everything lives here.

pub mod config;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size of the working alphabet (A–Z).
pub const ALPHABET_LEN: usize = 26;

// ---------------------------------------------------------------------------
// CleanedText
// ---------------------------------------------------------------------------

/// Ciphertext or plaintext reduced to the bare A–Z symbol stream.
///
/// Every analysis routine in the workspace operates on a `CleanedText`:
/// an ordered sequence of uppercase ASCII letters with everything else
/// discarded. Only symbol order and length matter; original byte offsets
/// are not retained.
///
/// The cleaning rule — keep ASCII alphabetic characters, uppercase them,
/// drop the rest — is deliberately identical to the rule the Vigenère
/// transform uses to advance its key index. Column alignment during key
/// recovery depends on the two rules matching exactly.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CleanedText(String);

impl CleanedText {
    /// Builds a `CleanedText` from raw input by discarding every
    /// non-ASCII-alphabetic character and uppercasing the rest.
    pub fn clean(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(|c| c.is_ascii_alphabetic())
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        )
    }

    /// Wraps an already-clean string.
    ///
    /// # Errors
    ///
    /// `CipherlabError::InvalidText` if any character is outside A–Z.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if let Some(bad) = text.chars().find(|c| !c.is_ascii_uppercase()) {
            return Err(CipherlabError::InvalidText {
                reason: format!("expected only uppercase A-Z, found {bad:?}"),
            });
        }
        Ok(Self(text))
    }

    /// Returns the letters as a byte slice (each byte in `b'A'..=b'Z'`).
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns the letters as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the text contains no letters at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CleanedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// LanguageProfile
// ---------------------------------------------------------------------------

/// Relative letter frequencies of English text (A through Z).
const ENGLISH_FREQUENCIES: [f64; ALPHABET_LEN] = [
    0.08167, 0.01492, 0.02782, 0.04253, 0.12702, 0.02228, 0.02015, 0.06094,
    0.06966, 0.00153, 0.00772, 0.04025, 0.02406, 0.06749, 0.07507, 0.01929,
    0.00095, 0.05987, 0.06327, 0.09056, 0.02758, 0.00978, 0.02360, 0.00150,
    0.01974, 0.00074,
];

/// Relative letter frequencies of Spanish text, with Ñ folded into N.
const SPANISH_FREQUENCIES: [f64; ALPHABET_LEN] = [
    0.1253, 0.0142, 0.0468, 0.0586, 0.1368, 0.0069, 0.0101, 0.0070,
    0.0625, 0.0044, 0.0002, 0.0497, 0.0315, 0.0702, 0.0868, 0.0251,
    0.0088, 0.0687, 0.0798, 0.0463, 0.0393, 0.0090, 0.0001, 0.0022,
    0.0090, 0.0052,
];

/// Letter-frequency profile of a target language.
///
/// Holds the 26 relative frequencies (summing to 1) used by the
/// Index-of-Coincidence estimator and the frequency-matching key
/// recovery. Profiles are immutable configuration values passed
/// explicitly into estimator calls, so tests can supply synthetic
/// profiles without touching global state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LanguageProfile {
    frequencies: [f64; ALPHABET_LEN],
}

impl LanguageProfile {
    /// Tolerance accepted on the frequency sum (`1 ± SUM_TOLERANCE`).
    pub const SUM_TOLERANCE: f64 = 0.01;

    /// Standard English letter frequencies.
    pub fn english() -> Self {
        Self {
            frequencies: ENGLISH_FREQUENCIES,
        }
    }

    /// Standard Spanish letter frequencies (Ñ folded into N).
    pub fn spanish() -> Self {
        Self {
            frequencies: SPANISH_FREQUENCIES,
        }
    }

    /// Builds a profile from explicit frequencies.
    ///
    /// # Errors
    ///
    /// `CipherlabError::InvalidProfile` if any frequency is negative or
    /// not finite, or if the sum strays outside `1 ±` [`Self::SUM_TOLERANCE`].
    pub fn from_frequencies(frequencies: [f64; ALPHABET_LEN]) -> Result<Self> {
        let profile = Self { frequencies };
        profile.validate()?;
        Ok(profile)
    }

    /// Validates the frequency table.
    ///
    /// Deserialized profiles bypass [`Self::from_frequencies`], so callers
    /// loading profiles from disk should validate explicitly.
    pub fn validate(&self) -> Result<()> {
        for (i, &f) in self.frequencies.iter().enumerate() {
            if !f.is_finite() || f < 0.0 {
                return Err(CipherlabError::InvalidProfile {
                    reason: format!(
                        "frequency for {} must be finite and non-negative, got {f}",
                        (b'A' + i as u8) as char,
                    ),
                });
            }
        }
        let sum: f64 = self.frequencies.iter().sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(CipherlabError::InvalidProfile {
                reason: format!("frequencies must sum to 1 (±{}), got {sum}", Self::SUM_TOLERANCE),
            });
        }
        Ok(())
    }

    /// Relative frequency of the letter at alphabet index `i` (0 = A).
    ///
    /// # Panics
    ///
    /// Panics if `i >= 26`.
    pub fn frequency(&self, i: usize) -> f64 {
        self.frequencies[i]
    }

    /// The full frequency table, A through Z.
    pub fn frequencies(&self) -> &[f64; ALPHABET_LEN] {
        &self.frequencies
    }

    /// Theoretical Index of Coincidence of the language: `Σ p_i²`.
    ///
    /// Monoalphabetic ciphertext in this language clusters around this
    /// value; uniformly random letter streams sit near `1/26 ≈ 0.0385`.
    pub fn index_of_coincidence(&self) -> f64 {
        self.frequencies.iter().map(|p| p * p).sum()
    }
}

// ---------------------------------------------------------------------------
// CipherlabError
// ---------------------------------------------------------------------------

/// Central error type for the cipherlab workspace.
///
/// All crates in the workspace convert their internal failures into
/// variants of this enum, ensuring a unified error handling surface.
#[derive(Debug, Error)]
pub enum CipherlabError {
    /// A multiplicative key has no inverse under the requested modulus.
    #[error("not invertible: {reason}")]
    NotInvertible {
        /// Human-readable description, including the offending gcd.
        reason: String,
    },

    /// A cipher key is structurally invalid (empty, out of range, wrong
    /// symbol class).
    #[error("invalid key: {reason}")]
    InvalidKey {
        /// Human-readable description of the key validation failure.
        reason: String,
    },

    /// A language profile is malformed.
    #[error("invalid language profile: {reason}")]
    InvalidProfile {
        /// Human-readable description of the profile problem.
        reason: String,
    },

    /// Text handed to a strict constructor contained symbols outside the
    /// working alphabet.
    #[error("invalid text: {reason}")]
    InvalidText {
        /// Human-readable description of the offending content.
        reason: String,
    },

    /// A configuration value is outside its acceptable range.
    #[error("config error: {reason}")]
    ConfigError {
        /// Human-readable description of the configuration problem.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Result alias
// ---------------------------------------------------------------------------

/// Convenience result type using [`CipherlabError`].
pub type Result<T> = std::result::Result<T, CipherlabError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
