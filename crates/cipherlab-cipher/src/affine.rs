//! Affine monoalphabetic cipher over byte streams.
//!
//! Encryption maps each input byte `x` to `(a*x + b) mod m`; decryption
//! applies `a⁻¹ * (y - b) mod m` with the inverse obtained from the
//! extended Euclidean solver. Keys are arbitrary-precision integers and
//! are reduced modulo `m` once before the per-byte loop, which keeps the
//! hot path in machine words while staying exact.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::ToPrimitive;

use cipherlab_arith::modular_inverse;
use cipherlab_types::{CipherlabError, Result};

/// Largest modulus the byte-stream transform accepts.
///
/// Output symbols are single bytes, so a modulus above 256 would force
/// values that cannot be written back without truncation — and silent
/// truncation would make ciphertext undecryptable.
pub const MAX_MODULUS: u32 = 256;

// ---------------------------------------------------------------------------
// AffineKey
// ---------------------------------------------------------------------------

/// Validated affine key triple `(a, b, m)`.
#[derive(Clone, Debug)]
pub struct AffineKey {
    a: BigInt,
    b: BigInt,
    m: BigInt,
}

impl AffineKey {
    /// Creates a key after range-checking the modulus.
    ///
    /// Coprimality of `a` and `m` is **not** checked here: encryption is
    /// well defined for any `a`, and decryption reports `NotInvertible`
    /// when the inverse does not exist.
    ///
    /// # Errors
    ///
    /// `CipherlabError::InvalidKey` if `m < 2` or `m >` [`MAX_MODULUS`].
    pub fn new(a: BigInt, b: BigInt, m: BigInt) -> Result<Self> {
        if m < BigInt::from(2) {
            return Err(CipherlabError::InvalidKey {
                reason: format!("modulus must be at least 2, got {m}"),
            });
        }
        if m > BigInt::from(MAX_MODULUS) {
            return Err(CipherlabError::InvalidKey {
                reason: format!("modulus must be at most {MAX_MODULUS} for byte streams, got {m}"),
            });
        }
        Ok(Self { a, b, m })
    }

    /// The multiplicative key.
    pub fn a(&self) -> &BigInt {
        &self.a
    }

    /// The additive key.
    pub fn b(&self) -> &BigInt {
        &self.b
    }

    /// The modulus.
    pub fn modulus(&self) -> &BigInt {
        &self.m
    }

    /// Encrypts a byte stream: `y = (a*x + b) mod m` per byte.
    ///
    /// Input bytes at or above `m` are reduced modulo `m` first, exactly
    /// like every other symbol.
    pub fn encrypt(&self, input: &[u8]) -> Vec<u8> {
        let m = self.modulus_word();
        let a = reduce(&self.a, &self.m);
        let b = reduce(&self.b, &self.m);

        input
            .iter()
            .map(|&x| (((u64::from(x) % m) * a + b) % m) as u8)
            .collect()
    }

    /// Decrypts a byte stream: `x = a⁻¹ * (y - b) mod m` per byte.
    ///
    /// # Errors
    ///
    /// `CipherlabError::NotInvertible` when `gcd(a, m) != 1`.
    pub fn decrypt(&self, input: &[u8]) -> Result<Vec<u8>> {
        let inv = modular_inverse(&self.a, &self.m)?;
        tracing::debug!(inverse = %inv, modulus = %self.m, "affine inverse computed");

        let m = self.modulus_word();
        let a_inv = reduce(&inv, &self.m);
        let b = reduce(&self.b, &self.m);

        Ok(input
            .iter()
            .map(|&y| {
                let shifted = (u64::from(y) % m + m - b) % m;
                ((a_inv * shifted) % m) as u8
            })
            .collect())
    }

    fn modulus_word(&self) -> u64 {
        // Validated to lie in [2, 256] at construction.
        self.m.to_u64().unwrap_or(u64::from(MAX_MODULUS))
    }
}

/// Reduces an arbitrary-precision key component into `[0, m)` as a
/// machine word. `m` is at most 256, so the cast is lossless.
fn reduce(v: &BigInt, m: &BigInt) -> u64 {
    v.mod_floor(m).to_u64().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn key(a: i64, b: i64, m: i64) -> AffineKey {
        AffineKey::new(BigInt::from(a), BigInt::from(b), BigInt::from(m))
            .expect("valid test key")
    }

    #[test]
    fn roundtrip_full_byte_alphabet() -> Result<()> {
        let key = key(7, 3, 256);
        let plain: Vec<u8> = (0u8..=255).collect();
        let cipher = key.encrypt(&plain);
        assert_ne!(cipher, plain);
        assert_eq!(key.decrypt(&cipher)?, plain);
        Ok(())
    }

    #[test]
    fn roundtrip_letters_mod_26() -> Result<()> {
        let key = key(5, 8, 26);
        let plain: Vec<u8> = (0u8..26).collect();
        let cipher = key.encrypt(&plain);
        assert_eq!(key.decrypt(&cipher)?, plain);
        Ok(())
    }

    #[test]
    fn known_vector_mod_26() {
        // E(0) = 8, E(1) = 13 under a=5, b=8.
        let key = key(5, 8, 26);
        assert_eq!(key.encrypt(&[0, 1]), vec![8, 13]);
    }

    #[test]
    fn negative_keys_are_reduced() -> Result<()> {
        // a = -21 ≡ 5 (mod 26), so the two keys are the same transform.
        let neg = key(-21, -18, 26);
        let pos = key(5, 8, 26);
        let plain: Vec<u8> = (0u8..26).collect();
        assert_eq!(neg.encrypt(&plain), pos.encrypt(&plain));
        assert_eq!(neg.decrypt(&pos.encrypt(&plain))?, plain);
        Ok(())
    }

    #[test]
    fn decrypt_fails_without_inverse() {
        let key = key(4, 1, 26);
        let err = key.decrypt(&[0, 1, 2]).unwrap_err();
        assert!(matches!(err, CipherlabError::NotInvertible { .. }));
    }

    #[test]
    fn encrypt_allows_non_coprime_key() {
        // Encryption is defined for any a; only decryption needs the inverse.
        let key = key(4, 1, 26);
        let cipher = key.encrypt(&[0, 1, 2]);
        assert_eq!(cipher, vec![1, 5, 9]);
    }

    #[test]
    fn modulus_below_two_rejected() {
        assert!(AffineKey::new(BigInt::from(3), BigInt::from(1), BigInt::from(1)).is_err());
        assert!(AffineKey::new(BigInt::from(3), BigInt::from(1), BigInt::from(0)).is_err());
    }

    #[test]
    fn modulus_above_256_rejected() {
        let err =
            AffineKey::new(BigInt::from(3), BigInt::from(1), BigInt::from(257)).unwrap_err();
        assert!(matches!(err, CipherlabError::InvalidKey { .. }));
    }

    #[test]
    fn identity_key_is_noop() -> Result<()> {
        let key = key(1, 0, 256);
        let plain = b"unchanged".to_vec();
        assert_eq!(key.encrypt(&plain), plain);
        assert_eq!(key.decrypt(&plain)?, plain);
        Ok(())
    }

    #[test]
    fn empty_input_yields_empty_output() -> Result<()> {
        let key = key(7, 3, 256);
        assert!(key.encrypt(&[]).is_empty());
        assert!(key.decrypt(&[])?.is_empty());
        Ok(())
    }
}
