//! Vigenère cipher commands: encrypt, decrypt.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use cipherlab_cipher::VigenereKey;

use crate::{io, output, GlobalOpts};

/// Key and I/O arguments shared by encrypt and decrypt.
#[derive(Args)]
pub struct VigenereArgs {
    /// Keyword (letters only; case-insensitive).
    #[arg(short = 'k', long)]
    key: String,

    /// Input file (defaults to stdin).
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output file (defaults to stdout).
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum VigenereAction {
    /// Shift letters forward by the keyword; everything else passes
    /// through unchanged.
    Encrypt(VigenereArgs),
    /// Shift letters back by the keyword.
    Decrypt(VigenereArgs),
}

pub fn run(action: VigenereAction, opts: &GlobalOpts) -> std::result::Result<(), String> {
    let (args, encrypt) = match action {
        VigenereAction::Encrypt(args) => (args, true),
        VigenereAction::Decrypt(args) => (args, false),
    };

    let key = VigenereKey::new(&args.key).map_err(|e| e.to_string())?;
    let text = io::read_text(args.input.as_deref())?;
    let result = if encrypt {
        key.encrypt(&text)
    } else {
        key.decrypt(&text)
    };
    io::write_text(args.output.as_deref(), &result)?;

    if args.output.is_some() {
        output::print_success(
            &format!("processed {} characters", result.chars().count()),
            opts.json,
        );
    }
    Ok(())
}
