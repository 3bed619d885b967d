//! Kasiski key-length estimation.
//!
//! A polyalphabetic cipher leaks its period through repeated n-grams:
//! when the same plaintext fragment meets the same key column twice,
//! the ciphertext repeats, and the distance between the repeats is a
//! multiple of the key length.
//!
//! # Algorithm
//!
//! Every overlapping n-gram is encoded as a base-26 integer and paired
//! with its position. Sorting by (code, position) turns identical
//! n-grams into contiguous runs. For each run of two or more
//! occurrences, the distances from the run's **first** occurrence to
//! every later one are filtered for noise (too short, or at/above half
//! the text) and folded into a single GCD; a run whose GCD lands in
//! `[2, max_candidate]` casts exactly one vote for that key length.
//! First-to-each distances bound the work per run at O(run size)
//! instead of O(run size²) for all pairs.

use num_integer::gcd;
use serde::Serialize;

use cipherlab_types::config::KasiskiConfig;
use cipherlab_types::{CleanedText, Result};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// One candidate key length and the number of runs that voted for it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LengthVote {
    /// Candidate key length.
    pub length: usize,
    /// Number of repeated-n-gram runs whose distance GCD equals `length`.
    pub votes: usize,
}

/// A repeated n-gram run that contributed a vote.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RepeatedNgram {
    /// The repeated n-gram itself.
    pub ngram: String,
    /// How many times it occurs in the text.
    pub occurrences: usize,
    /// GCD of the surviving first-to-each distances.
    pub gcd: usize,
}

/// Ranked result of a Kasiski pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KasiskiReport {
    /// Candidates ordered by votes descending, then by length ascending.
    pub candidates: Vec<LengthVote>,
    /// The runs that cast votes, in text order of first occurrence.
    pub groups: Vec<RepeatedNgram>,
}

impl KasiskiReport {
    /// The top-voted key length, if any run produced a usable GCD.
    pub fn best(&self) -> Option<usize> {
        self.candidates.first().map(|c| c.length)
    }

    /// True when no run yielded a usable GCD. Expected for short or
    /// low-repetition texts; the caller should fall back to the Index
    /// of Coincidence or a larger sample.
    pub fn is_inconclusive(&self) -> bool {
        self.candidates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Estimates the key length from repeated n-gram distances.
///
/// An empty report is a valid outcome, not an error: it means the text
/// carries too little repetition to say anything.
///
/// # Errors
///
/// `CipherlabError::ConfigError` if the configuration fails validation.
pub fn kasiski_estimate(text: &CleanedText, config: &KasiskiConfig) -> Result<KasiskiReport> {
    config.validate()?;

    let bytes = text.as_bytes();
    let n = config.ngram_len;
    if bytes.len() < 2 * n {
        return Ok(KasiskiReport {
            candidates: Vec::new(),
            groups: Vec::new(),
        });
    }

    // Occurrence list: (base-26 code, position). Transient, scoped to
    // this call, proportional to the text length.
    let mut occurrences: Vec<(u64, usize)> = bytes
        .windows(n)
        .enumerate()
        .map(|(pos, window)| {
            let code = window
                .iter()
                .fold(0u64, |acc, &b| acc * 26 + u64::from(b - b'A'));
            (code, pos)
        })
        .collect();
    occurrences.sort_unstable();

    let distance_cap = bytes.len() / 2;
    let mut votes = vec![0usize; config.max_candidate + 1];
    let mut groups = Vec::new();

    let mut i = 0;
    while i < occurrences.len() {
        let mut j = i + 1;
        while j < occurrences.len() && occurrences[j].0 == occurrences[i].0 {
            j += 1;
        }

        if j - i >= 2 {
            let first = occurrences[i].1;
            let mut run_gcd = 0usize;
            for &(_, pos) in &occurrences[i + 1..j] {
                let d = pos - first;
                if d < config.min_distance || d >= distance_cap {
                    continue;
                }
                run_gcd = if run_gcd == 0 { d } else { gcd(run_gcd, d) };
            }

            if (2..=config.max_candidate).contains(&run_gcd) {
                votes[run_gcd] += 1;
                let ngram: String =
                    bytes[first..first + n].iter().map(|&b| b as char).collect();
                tracing::debug!(
                    %ngram,
                    occurrences = j - i,
                    gcd = run_gcd,
                    "repeated n-gram casts a vote"
                );
                groups.push(RepeatedNgram {
                    ngram,
                    occurrences: j - i,
                    gcd: run_gcd,
                });
            }
        }

        i = j;
    }

    let mut candidates: Vec<LengthVote> = votes
        .iter()
        .enumerate()
        .skip(2)
        .filter(|&(_, &v)| v > 0)
        .map(|(length, &votes)| LengthVote { length, votes })
        .collect();
    candidates.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.length.cmp(&b.length)));

    Ok(KasiskiReport { candidates, groups })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
