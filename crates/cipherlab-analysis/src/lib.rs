//! Vigenère cryptanalysis engine for the cipherlab toolkit.
//!
//! Recovery of an unknown key proceeds in two stages: estimate the key
//! length, then recover one subkey letter per key column. Two
//! independent length estimators are provided and deliberately **not**
//! reconciled — they are cross-checks, and a disagreement is itself
//! information the caller should see.
//!
//! # Modules
//!
//! - [`kasiski`] — key-length estimation from repeated n-gram distances
//! - [`coincidence`] — key-length estimation from the Index of
//!   Coincidence
//! - [`recovery`] — per-column subkey recovery by language-frequency
//!   matching
//!
//! Every entry point is a pure function of its inputs: same cleaned
//! text and configuration, bit-identical report. There is no hidden
//! randomness and no shared state between calls.

pub mod coincidence;
pub mod kasiski;
pub mod recovery;

pub use coincidence::{ic_estimate, IcReport, IcScore};
pub use kasiski::{kasiski_estimate, KasiskiReport, LengthVote, RepeatedNgram};
pub use recovery::{recover_key, ColumnEstimate, RecoveredKey};
