//! Affine cipher commands: plain byte-stream and block-permutation
//! variants.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use num_bigint::BigInt;

use cipherlab_cipher::{AffineKey, BlockAffineKey};

use crate::{io, output, GlobalOpts};

// ---------------------------------------------------------------------------
// Plain affine
// ---------------------------------------------------------------------------

/// Key and I/O arguments shared by encrypt and decrypt.
#[derive(Args)]
pub struct AffineArgs {
    /// Multiplicative key (decimal, arbitrary precision).
    #[arg(short = 'a', long)]
    mult: String,

    /// Additive key (decimal, arbitrary precision).
    #[arg(short = 'b', long)]
    add: String,

    /// Modulus, 2..=256.
    #[arg(short = 'm', long, default_value = "256")]
    modulus: String,

    /// Input file (defaults to stdin).
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output file (defaults to stdout).
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum AffineAction {
    /// Encrypt: y = (a*x + b) mod m, byte by byte.
    Encrypt(AffineArgs),
    /// Decrypt: x = a⁻¹ * (y - b) mod m, byte by byte.
    Decrypt(AffineArgs),
}

pub fn run(action: AffineAction, opts: &GlobalOpts) -> std::result::Result<(), String> {
    let (args, encrypt) = match action {
        AffineAction::Encrypt(args) => (args, true),
        AffineAction::Decrypt(args) => (args, false),
    };

    let key = AffineKey::new(
        parse_bigint(&args.mult, "multiplicative key")?,
        parse_bigint(&args.add, "additive key")?,
        parse_bigint(&args.modulus, "modulus")?,
    )
    .map_err(|e| e.to_string())?;

    let data = io::read_bytes(args.input.as_deref())?;
    let result = if encrypt {
        key.encrypt(&data)
    } else {
        key.decrypt(&data).map_err(|e| e.to_string())?
    };
    io::write_bytes(args.output.as_deref(), &result)?;

    if args.output.is_some() {
        output::print_success(
            &format!("processed {} bytes", result.len()),
            opts.json,
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Block affine
// ---------------------------------------------------------------------------

/// Key and I/O arguments for the block variant (modulus fixed at 65536).
#[derive(Args)]
pub struct BlockArgs {
    /// Multiplicative key, must be odd (decimal, arbitrary precision).
    #[arg(short = 'a', long)]
    mult: String,

    /// Additive key (decimal, arbitrary precision).
    #[arg(short = 'b', long)]
    add: String,

    /// Seed for the window permutation.
    #[arg(short = 's', long)]
    seed: u32,

    /// Input file (defaults to stdin).
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output file (defaults to stdout).
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum BlockAction {
    /// Encrypt 16-bit blocks and shuffle each window.
    Encrypt(BlockArgs),
    /// Undo the window shuffle and decrypt 16-bit blocks.
    Decrypt(BlockArgs),
}

pub fn run_block(action: BlockAction, opts: &GlobalOpts) -> std::result::Result<(), String> {
    let (args, encrypt) = match action {
        BlockAction::Encrypt(args) => (args, true),
        BlockAction::Decrypt(args) => (args, false),
    };

    let key = BlockAffineKey::new(
        parse_bigint(&args.mult, "multiplicative key")?,
        parse_bigint(&args.add, "additive key")?,
        args.seed,
    )
    .map_err(|e| e.to_string())?;

    let data = io::read_bytes(args.input.as_deref())?;
    let result = if encrypt {
        key.encrypt(&data)
    } else {
        key.decrypt(&data).map_err(|e| e.to_string())?
    };
    io::write_bytes(args.output.as_deref(), &result)?;

    if args.output.is_some() {
        output::print_success(
            &format!("processed {} bytes", result.len()),
            opts.json,
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_bigint(s: &str, what: &str) -> std::result::Result<BigInt, String> {
    s.parse::<BigInt>()
        .map_err(|_| format!("invalid {what}: {s:?} is not a decimal integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_keys() {
        assert_eq!(parse_bigint("42", "key").unwrap(), BigInt::from(42));
        assert_eq!(parse_bigint("-7", "key").unwrap(), BigInt::from(-7));
    }

    #[test]
    fn parses_arbitrary_precision_keys() {
        let big = "123456789012345678901234567890";
        assert!(parse_bigint(big, "key").is_ok());
    }

    #[test]
    fn rejects_non_decimal_keys() {
        let err = parse_bigint("0x1F", "multiplicative key").unwrap_err();
        assert!(err.contains("multiplicative key"));
    }
}
