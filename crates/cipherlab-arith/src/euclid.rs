//! Euclidean and extended-Euclidean algorithms over `BigInt`.
//!
//! # Algorithm
//!
//! ```text
//! r0 = a, r1 = b,  s0 = 1, s1 = 0,  t0 = 0, t1 = 1
//! while r_i != 0:
//!     q       = floor(r_{i-1} / r_i)
//!     r_{i+1} = r_{i-1} - q * r_i     (and symmetrically for s, t)
//! ```
//!
//! The last nonzero remainder is the gcd; its paired `s, t` satisfy
//! Bézout's identity `a*s + b*t == gcd`. Quotients use **floored**
//! division so the recurrence is well defined for negative inputs; the
//! remainder magnitudes strictly decrease, so the loop terminates for
//! any inputs, zero included. Step count is bounded by the input
//! magnitudes — consecutive Fibonacci numbers are the worst case.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use cipherlab_types::{CipherlabError, Result};

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Result of the extended Euclidean algorithm.
///
/// Invariant: `a*s + b*t == gcd` holds bit-exactly for the inputs that
/// produced this value, and `gcd` is never negative.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bezout {
    /// Greatest common divisor of the inputs, always non-negative.
    pub gcd: BigInt,
    /// Coefficient of `a` in Bézout's identity.
    pub s: BigInt,
    /// Coefficient of `b` in Bézout's identity.
    pub t: BigInt,
}

/// Result of the plain Euclidean algorithm with its quotient trail.
///
/// The quotient sequence is what continued-fraction expansions consume;
/// the cryptanalysis engine itself only ever needs [`Bezout`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GcdSequence {
    /// Floored quotient produced at each division step, in order.
    pub quotients: Vec<BigInt>,
    /// Greatest common divisor of the inputs, always non-negative.
    pub gcd: BigInt,
}

// ---------------------------------------------------------------------------
// Algorithms
// ---------------------------------------------------------------------------

/// Runs the extended Euclidean algorithm on `(a, b)`.
///
/// Accepts any sign, including zero: `extended_gcd(a, 0)` yields
/// `gcd = |a|` with trivial coefficients, and `(0, 0)` yields `gcd = 0`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> Bezout {
    let mut r0 = a.clone();
    let mut r1 = b.clone();
    let mut s0 = BigInt::one();
    let mut s1 = BigInt::zero();
    let mut t0 = BigInt::zero();
    let mut t1 = BigInt::one();

    while !r1.is_zero() {
        let q = r0.div_floor(&r1);
        let r2 = &r0 - &q * &r1;
        let s2 = &s0 - &q * &s1;
        let t2 = &t0 - &q * &t1;
        r0 = std::mem::replace(&mut r1, r2);
        s0 = std::mem::replace(&mut s1, s2);
        t0 = std::mem::replace(&mut t1, t2);
    }

    // Floored division leaves the final remainder with the sign of b;
    // normalize so the gcd is non-negative without breaking the identity.
    if r0.is_negative() {
        r0 = -r0;
        s0 = -s0;
        t0 = -t0;
    }

    Bezout {
        gcd: r0,
        s: s0,
        t: t0,
    }
}

/// Runs the plain Euclidean algorithm on `(a, b)`, recording every
/// intermediate quotient.
pub fn gcd_sequence(a: &BigInt, b: &BigInt) -> GcdSequence {
    let mut r0 = a.clone();
    let mut r1 = b.clone();
    let mut quotients = Vec::new();

    while !r1.is_zero() {
        let q = r0.div_floor(&r1);
        let r2 = &r0 - &q * &r1;
        quotients.push(q);
        r0 = std::mem::replace(&mut r1, r2);
    }

    GcdSequence {
        quotients,
        gcd: r0.abs(),
    }
}

/// Computes the modular inverse of `a` under modulus `m`, reduced into
/// `[0, m)`.
///
/// # Errors
///
/// `CipherlabError::NotInvertible` when `m` is not positive or when
/// `gcd(a, m) != 1` — a multiplicative key that shares a factor with
/// the modulus cannot be undone, and the caller must abort rather than
/// fall back silently.
pub fn modular_inverse(a: &BigInt, m: &BigInt) -> Result<BigInt> {
    if !m.is_positive() {
        return Err(CipherlabError::NotInvertible {
            reason: format!("modulus must be positive, got {m}"),
        });
    }

    let bezout = extended_gcd(a, m);
    if !bezout.gcd.is_one() {
        return Err(CipherlabError::NotInvertible {
            reason: format!("gcd({a}, {m}) = {}, expected 1", bezout.gcd),
        });
    }

    Ok(bezout.s.mod_floor(m))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
