//! Exact extended-Euclidean arithmetic for the cipherlab toolkit.
//!
//! This crate is the **sole** location for modular arithmetic over
//! arbitrary-precision integers. The affine cipher obtains its
//! decryption inverses here; nothing else in the workspace touches
//! Bézout coefficients directly.
//!
//! # Modules
//!
//! - [`euclid`] — Euclidean and extended-Euclidean algorithms, modular
//!   inverse computation

pub mod euclid;

pub use euclid::{extended_gcd, gcd_sequence, modular_inverse, Bezout, GcdSequence};
