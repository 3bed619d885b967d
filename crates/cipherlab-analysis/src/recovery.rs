//! Per-column subkey recovery by language-frequency matching.
//!
//! With the key length fixed at `n`, ciphertext letters split into `n`
//! monoalphabetic columns. Each column is scored against the target
//! language with the mutual-index statistic
//!
//! ```text
//! M(s) = Σ_j P_j * f_{(j+s) mod 26} / N
//! ```
//!
//! where `P` is the language's letter-probability vector, `f` the
//! column's histogram, and `N` the column's letter count. `M(s)` is the
//! correlation between the known language shape and the column shifted
//! back by the candidate key letter `s`; only at the true shift do the
//! two distributions re-align, so the maximizing `s` is the column's
//! subkey estimate.
//!
//! Column assignment walks the cleaned text with a counter that exists
//! only for letters — the same advance rule the Vigenère transform uses
//! for its key index. The two rules must stay identical or recovery
//! silently desynchronizes.

use serde::Serialize;

use cipherlab_types::{CipherlabError, CleanedText, LanguageProfile, Result, ALPHABET_LEN};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Estimate for a single key column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnEstimate {
    /// Chosen shift in `0..26` (0 = A).
    pub shift: u8,
    /// Number of ciphertext letters observed in this column.
    pub count: usize,
    /// `M(shift)`, the winning matching score.
    pub score: f64,
    /// True when the column held no letters at all. The shift is then a
    /// placeholder (0), reported rather than omitted so that column
    /// indices stay meaningful.
    pub degenerate: bool,
}

/// A recovered Vigenère key with its per-column evidence.
///
/// Value type, immutable once returned.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecoveredKey {
    /// The key letters, one per column, after period reduction.
    pub key: String,
    /// Evidence for every original column (pre-reduction).
    pub columns: Vec<ColumnEstimate>,
    /// When the assembled key turned out periodic, the length it had
    /// before being reduced to its minimal period.
    pub reduced_from: Option<usize>,
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

/// Recovers one subkey letter per column for a known key length.
///
/// Degenerate columns (no letters) yield shift 0 with the `degenerate`
/// flag set — a documented placeholder, never a division fault. After
/// assembly, a key that repeats with some divisor period is reduced to
/// that period, with the original length recorded.
///
/// # Errors
///
/// `CipherlabError::ConfigError` if `key_length` is zero.
pub fn recover_key(
    text: &CleanedText,
    key_length: usize,
    profile: &LanguageProfile,
) -> Result<RecoveredKey> {
    if key_length == 0 {
        return Err(CipherlabError::ConfigError {
            reason: "key length must be at least 1".into(),
        });
    }

    // Column histograms. The position counter is the byte index of the
    // cleaned text, which by construction advances only over letters.
    let mut histograms = vec![[0usize; ALPHABET_LEN]; key_length];
    for (i, &b) in text.as_bytes().iter().enumerate() {
        histograms[i % key_length][(b - b'A') as usize] += 1;
    }

    let mut columns = Vec::with_capacity(key_length);
    let mut key = String::with_capacity(key_length);

    for (col, freq) in histograms.iter().enumerate() {
        let count: usize = freq.iter().sum();
        if count == 0 {
            tracing::debug!(column = col, "degenerate column, placeholder shift 0");
            columns.push(ColumnEstimate {
                shift: 0,
                count: 0,
                score: 0.0,
                degenerate: true,
            });
            key.push('A');
            continue;
        }

        let mut best_shift = 0usize;
        let mut best_score = f64::NEG_INFINITY;
        for s in 0..ALPHABET_LEN {
            let mut m = 0.0;
            for j in 0..ALPHABET_LEN {
                m += profile.frequency(j) * freq[(j + s) % ALPHABET_LEN] as f64;
            }
            let m = m / count as f64;
            // Strict comparison keeps the smallest shift on ties.
            if m > best_score {
                best_score = m;
                best_shift = s;
            }
        }

        tracing::debug!(
            column = col,
            shift = best_shift,
            score = best_score,
            letters = count,
            "column subkey chosen"
        );
        columns.push(ColumnEstimate {
            shift: best_shift as u8,
            count,
            score: best_score,
            degenerate: false,
        });
        key.push((b'A' + best_shift as u8) as char);
    }

    let (key, reduced_from) = reduce_period(key);
    Ok(RecoveredKey {
        key,
        columns,
        reduced_from,
    })
}

/// Reduces a key to its minimal period when it repeats with some
/// divisor of its length.
fn reduce_period(key: String) -> (String, Option<usize>) {
    let n = key.len();
    let bytes = key.as_bytes();
    for d in 1..n {
        if n % d != 0 {
            continue;
        }
        if (0..n).all(|i| bytes[i] == bytes[i % d]) {
            return (key[..d].to_string(), Some(n));
        }
    }
    (key, None)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Profile concentrated on A, B, C.
    fn synthetic_profile() -> LanguageProfile {
        let mut freqs = [0.0; ALPHABET_LEN];
        freqs[0] = 0.5;
        freqs[1] = 0.3;
        freqs[2] = 0.2;
        LanguageProfile::from_frequencies(freqs).expect("valid synthetic profile")
    }

    #[test]
    fn caesar_shift_recovered_exactly() -> Result<()> {
        // Plaintext stats match the profile (50 A, 30 B, 20 C), shifted
        // by 3: D/E/F. M(3) = 0.38 dominates every other shift.
        let shifted = "DE".repeat(30) + &"DF".repeat(20);
        let text = CleanedText::clean(&shifted);
        let recovered = recover_key(&text, 1, &synthetic_profile())?;
        assert_eq!(recovered.key, "D");
        assert_eq!(recovered.columns.len(), 1);
        assert_eq!(recovered.columns[0].shift, 3);
        assert!(!recovered.columns[0].degenerate);
        assert!((recovered.columns[0].score - 0.38).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn two_column_key_recovered() -> Result<()> {
        // Column 0 carries the profile unshifted, column 1 shifted by 1:
        // A-heavy letters interleaved with B-heavy ones.
        let mut raw = String::new();
        for _ in 0..50 {
            raw.push('A');
            raw.push('B');
        }
        for _ in 0..30 {
            raw.push('B');
            raw.push('C');
        }
        for _ in 0..20 {
            raw.push('C');
            raw.push('D');
        }
        let text = CleanedText::clean(&raw);
        let recovered = recover_key(&text, 2, &synthetic_profile())?;
        assert_eq!(recovered.key, "AB");
        assert_eq!(recovered.reduced_from, None);
        Ok(())
    }

    #[test]
    fn degenerate_columns_are_flagged_not_dropped() -> Result<()> {
        let text = CleanedText::clean("AB");
        let recovered = recover_key(&text, 3, &synthetic_profile())?;
        assert_eq!(recovered.columns.len(), 3);
        assert!(!recovered.columns[0].degenerate);
        assert!(!recovered.columns[1].degenerate);
        assert!(recovered.columns[2].degenerate);
        assert_eq!(recovered.columns[2].shift, 0);
        assert_eq!(recovered.columns[2].count, 0);
        Ok(())
    }

    #[test]
    fn empty_text_is_all_degenerate() -> Result<()> {
        let text = CleanedText::clean("");
        let recovered = recover_key(&text, 3, &synthetic_profile())?;
        assert!(recovered.columns.iter().all(|c| c.degenerate));
        // Three placeholder A's collapse to the minimal period.
        assert_eq!(recovered.key, "A");
        assert_eq!(recovered.reduced_from, Some(3));
        Ok(())
    }

    #[test]
    fn zero_key_length_rejected() {
        let text = CleanedText::clean("ABC");
        assert!(recover_key(&text, 0, &synthetic_profile()).is_err());
    }

    #[test]
    fn periodic_key_is_reduced() {
        let (key, reduced) = reduce_period("ABAB".into());
        assert_eq!(key, "AB");
        assert_eq!(reduced, Some(4));
    }

    #[test]
    fn aperiodic_key_is_untouched() {
        let (key, reduced) = reduce_period("ABC".into());
        assert_eq!(key, "ABC");
        assert_eq!(reduced, None);
    }

    #[test]
    fn constant_key_reduces_to_single_letter() {
        let (key, reduced) = reduce_period("DDDD".into());
        assert_eq!(key, "D");
        assert_eq!(reduced, Some(4));
    }

    #[test]
    fn non_divisor_repetition_is_not_reduced() {
        // "ABA" repeats visually but 2 does not divide 3.
        let (key, reduced) = reduce_period("ABA".into());
        assert_eq!(key, "ABA");
        assert_eq!(reduced, None);
    }

    #[test]
    fn reruns_are_bit_identical() -> Result<()> {
        let text = CleanedText::clean(&"DE".repeat(40));
        let profile = synthetic_profile();
        let a = recover_key(&text, 2, &profile)?;
        let b = recover_key(&text, 2, &profile)?;
        assert_eq!(a, b);
        Ok(())
    }
}
