//! Block-permutation obfuscation layered on the affine cipher.
//!
//! Input is consumed as 16-bit big-endian blocks in windows of
//! [`WINDOW_BLOCKS`]. Each block is mapped through
//! `y = (a*x + b) mod 65536`, then the window is shuffled with a
//! Fisher–Yates pass driven by a deterministic LCG reseeded from the
//! key's seed at every window. Decryption regenerates the permutation
//! from the same seed, inverts it, and undoes the affine map.
//!
//! An odd-length input gains a single 0x00 pad byte that survives the
//! round trip; callers that need the exact original length must carry
//! it out-of-band.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::ToPrimitive;

use cipherlab_arith::modular_inverse;
use cipherlab_types::{CipherlabError, Result};

/// Number of 16-bit blocks shuffled together.
pub const WINDOW_BLOCKS: usize = 8;

/// Fixed modulus of the block transform: one 16-bit block.
pub const BLOCK_MODULUS: u32 = 65536;

// Numerical Recipes LCG constants; the generator only drives the
// shuffle, it has no cryptographic role.
const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;

// ---------------------------------------------------------------------------
// BlockAffineKey
// ---------------------------------------------------------------------------

/// Validated key for the block-permutation affine cipher.
#[derive(Clone, Debug)]
pub struct BlockAffineKey {
    a: BigInt,
    b: BigInt,
    seed: u32,
}

impl BlockAffineKey {
    /// Creates a key.
    ///
    /// # Errors
    ///
    /// `CipherlabError::InvalidKey` if `a` is even — only odd
    /// multipliers are coprime with 65536, and an even one could never
    /// be decrypted.
    pub fn new(a: BigInt, b: BigInt, seed: u32) -> Result<Self> {
        if a.is_even() {
            return Err(CipherlabError::InvalidKey {
                reason: format!("multiplicative key must be odd to be coprime with {BLOCK_MODULUS}, got {a}"),
            });
        }
        Ok(Self { a, b, seed })
    }

    /// The permutation seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Encrypts a byte stream.
    pub fn encrypt(&self, input: &[u8]) -> Vec<u8> {
        let m = u64::from(BLOCK_MODULUS);
        let a = reduce(&self.a);
        let b = reduce(&self.b);

        let mut out = Vec::with_capacity(input.len() + 1);
        for window in input.chunks(WINDOW_BLOCKS * 2) {
            let mut blocks = decode_blocks(window);
            for block in &mut blocks {
                *block = ((u64::from(*block) * a + b) % m) as u16;
            }
            shuffle(&mut blocks, self.seed);
            encode_blocks(&blocks, &mut out);
        }
        out
    }

    /// Decrypts a byte stream.
    ///
    /// # Errors
    ///
    /// `CipherlabError::NotInvertible` if the multiplier somehow lacks
    /// an inverse (unreachable for keys built via [`BlockAffineKey::new`]).
    pub fn decrypt(&self, input: &[u8]) -> Result<Vec<u8>> {
        let modulus = BigInt::from(BLOCK_MODULUS);
        let inv = modular_inverse(&self.a, &modulus)?;
        tracing::debug!(inverse = %inv, "block affine inverse computed");

        let m = u64::from(BLOCK_MODULUS);
        let a_inv = reduce(&inv);
        let b = reduce(&self.b);

        let mut out = Vec::with_capacity(input.len() + 1);
        for window in input.chunks(WINDOW_BLOCKS * 2) {
            let blocks = decode_blocks(window);
            let count = blocks.len();

            // Rebuild the encryption-side permutation, then invert it.
            let mut perm: Vec<usize> = (0..count).collect();
            shuffle(&mut perm, self.seed);
            let mut restored = vec![0u16; count];
            for (i, &p) in perm.iter().enumerate() {
                restored[p] = blocks[i];
            }

            for block in &mut restored {
                let shifted = (u64::from(*block) + m - b) % m;
                *block = ((a_inv * shifted) % m) as u16;
            }
            encode_blocks(&restored, &mut out);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Reduces a key component into `[0, 65536)` as a machine word.
fn reduce(v: &BigInt) -> u64 {
    v.mod_floor(&BigInt::from(BLOCK_MODULUS)).to_u64().unwrap_or(0)
}

/// Decodes a window of bytes into big-endian 16-bit blocks, padding an
/// odd tail with 0x00.
fn decode_blocks(window: &[u8]) -> Vec<u16> {
    window
        .chunks(2)
        .map(|pair| {
            let hi = u16::from(pair[0]);
            let lo = pair.get(1).copied().map(u16::from).unwrap_or(0);
            (hi << 8) | lo
        })
        .collect()
}

/// Appends blocks to the output as big-endian byte pairs.
fn encode_blocks(blocks: &[u16], out: &mut Vec<u8>) {
    for &block in blocks {
        out.push((block >> 8) as u8);
        out.push((block & 0xFF) as u8);
    }
}

/// Fisher–Yates shuffle driven by the LCG, identical on both sides of
/// the cipher so the permutation can be regenerated from the seed.
fn shuffle<T>(items: &mut [T], seed: u32) {
    let mut state = seed;
    for i in (1..items.len()).rev() {
        state = state.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
        let j = (state as usize) % (i + 1);
        items.swap(i, j);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
