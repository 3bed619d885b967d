//! Key-length estimation via the Index of Coincidence.
//!
//! The IC of a letter sequence is the probability that two randomly
//! chosen symbols are equal. Splitting ciphertext into `n` interleaved
//! columns undoes a period-`n` polyalphabetic cipher column-wise: at
//! the true key length every column is monoalphabetic and its IC
//! climbs back to the language's theoretical value, while at wrong
//! lengths the columns stay flattened toward uniform.
//!
//! This estimator is independent of the Kasiski test and serves as a
//! cross-check; the two may disagree and are both reported as-is.

use serde::Serialize;

use cipherlab_types::config::IcConfig;
use cipherlab_types::{CleanedText, LanguageProfile, Result, ALPHABET_LEN};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Averaged IC for one candidate key length.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IcScore {
    /// Candidate key length.
    pub length: usize,
    /// Per-column IC averaged over all `length` columns.
    pub avg_ic: f64,
    /// Absolute distance to the language's theoretical IC
    /// (lower is better, unlike Kasiski votes).
    pub distance: f64,
}

/// Result of an Index-of-Coincidence sweep.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IcReport {
    /// Theoretical IC of the target language (`Σ p_i²`).
    pub theoretical: f64,
    /// One score per candidate length, in ascending length order.
    pub scores: Vec<IcScore>,
}

impl IcReport {
    /// The score closest to the theoretical IC; ties break toward the
    /// smallest length.
    pub fn best(&self) -> Option<&IcScore> {
        self.scores.iter().min_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Scores every candidate key length in `1..=max_candidate` by averaged
/// per-column Index of Coincidence.
///
/// Columns with fewer than two letters have no defined IC; they
/// contribute zero but still count toward the average's denominator so
/// that sparsely populated lengths are not inflated.
///
/// # Errors
///
/// `CipherlabError::ConfigError` if the configuration fails validation.
pub fn ic_estimate(
    text: &CleanedText,
    config: &IcConfig,
    profile: &LanguageProfile,
) -> Result<IcReport> {
    config.validate()?;

    let bytes = text.as_bytes();
    let theoretical = profile.index_of_coincidence();
    let mut scores = Vec::with_capacity(config.max_candidate);

    for n in 1..=config.max_candidate {
        let mut total = 0.0;
        for k in 0..n {
            let mut freq = [0usize; ALPHABET_LEN];
            let mut count = 0usize;
            let mut idx = k;
            while idx < bytes.len() {
                freq[(bytes[idx] - b'A') as usize] += 1;
                count += 1;
                idx += n;
            }
            if count >= 2 {
                let coincidences: usize =
                    freq.iter().map(|&f| f * f.saturating_sub(1)).sum();
                total += coincidences as f64 / (count * (count - 1)) as f64;
            }
        }
        let avg_ic = total / n as f64;
        let distance = (avg_ic - theoretical).abs();
        tracing::trace!(length = n, avg_ic, distance, "ic candidate scored");
        scores.push(IcScore {
            length: n,
            avg_ic,
            distance,
        });
    }

    Ok(IcReport {
        theoretical,
        scores,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Profile concentrated on A, B, C: theoretical IC = 0.38.
    fn synthetic_profile() -> LanguageProfile {
        let mut freqs = [0.0; ALPHABET_LEN];
        freqs[0] = 0.5;
        freqs[1] = 0.3;
        freqs[2] = 0.2;
        LanguageProfile::from_frequencies(freqs).expect("valid synthetic profile")
    }

    #[test]
    fn monoalphabetic_text_scores_length_one() -> Result<()> {
        // 50 A, 30 B, 20 C: whole-text IC = 3700/9900 ≈ 0.3737, within
        // 0.01 of the profile's 0.38. Split in two, the even column is
        // all A (IC 1.0) and the average moves far away — so length 1
        // must win strictly.
        let text = CleanedText::clean(&("AB".repeat(30) + &"AC".repeat(20)));
        let report = ic_estimate(&text, &IcConfig { max_candidate: 5 }, &synthetic_profile())?;

        let best = report.best().expect("non-empty report");
        assert_eq!(best.length, 1);
        assert!(best.distance < 0.01, "distance was {}", best.distance);
        assert!(report.scores[0].distance < report.scores[1].distance);
        Ok(())
    }

    #[test]
    fn theoretical_value_comes_from_profile() -> Result<()> {
        let text = CleanedText::clean("ABC");
        let report = ic_estimate(&text, &IcConfig { max_candidate: 2 }, &synthetic_profile())?;
        assert!((report.theoretical - 0.38).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn sparse_columns_contribute_zero() -> Result<()> {
        // At length 3 a two-letter text has no column with two letters:
        // every column's IC is undefined and the average must be zero,
        // not a division fault.
        let text = CleanedText::clean("AB");
        let report = ic_estimate(&text, &IcConfig { max_candidate: 3 }, &synthetic_profile())?;
        assert_eq!(report.scores[2].avg_ic, 0.0);
        Ok(())
    }

    #[test]
    fn empty_text_yields_all_zero_scores() -> Result<()> {
        let text = CleanedText::clean("");
        let report = ic_estimate(&text, &IcConfig { max_candidate: 4 }, &synthetic_profile())?;
        assert!(report.scores.iter().all(|s| s.avg_ic == 0.0));
        Ok(())
    }

    #[test]
    fn scores_cover_every_candidate_in_order() -> Result<()> {
        let text = CleanedText::clean(&"QWERTYUIOP".repeat(10));
        let report = ic_estimate(&text, &IcConfig { max_candidate: 7 }, &LanguageProfile::english())?;
        let lengths: Vec<usize> = report.scores.iter().map(|s| s.length).collect();
        assert_eq!(lengths, vec![1, 2, 3, 4, 5, 6, 7]);
        Ok(())
    }

    #[test]
    fn constant_text_has_ic_one_at_every_length() -> Result<()> {
        let text = CleanedText::clean(&"E".repeat(40));
        let report = ic_estimate(&text, &IcConfig { max_candidate: 4 }, &LanguageProfile::english())?;
        for score in &report.scores {
            assert!((score.avg_ic - 1.0).abs() < 1e-12);
        }
        Ok(())
    }

    #[test]
    fn invalid_config_is_rejected() {
        let text = CleanedText::clean("ABC");
        let config = IcConfig { max_candidate: 0 };
        assert!(ic_estimate(&text, &config, &LanguageProfile::english()).is_err());
    }

    #[test]
    fn reruns_are_bit_identical() -> Result<()> {
        let text = CleanedText::clean(&"LOREMIPSUMDOLORSITAMET".repeat(5));
        let config = IcConfig { max_candidate: 10 };
        let profile = LanguageProfile::english();
        let a = ic_estimate(&text, &config, &profile)?;
        let b = ic_estimate(&text, &config, &profile)?;
        assert_eq!(a, b);
        Ok(())
    }
}
