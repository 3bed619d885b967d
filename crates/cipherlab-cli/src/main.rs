//! cipherlab CLI.
//!
//! Classical cipher operations and Vigenère cryptanalysis from the
//! command line. Input comes from `--input` files or stdin; output goes
//! to `--output` files or stdout.

mod commands;
mod io;
mod output;

use clap::{Parser, Subcommand};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// cipherlab — classical substitution ciphers and their cryptanalysis.
#[derive(Parser)]
#[command(name = "cipherlab", version, about)]
struct Cli {
    /// Output in JSON format (no colors, machine-readable).
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Affine cipher over byte streams.
    Affine {
        #[command(subcommand)]
        action: commands::affine::AffineAction,
    },
    /// Block-permutation affine cipher (16-bit blocks, shuffled windows).
    #[command(name = "affine-block")]
    AffineBlock {
        #[command(subcommand)]
        action: commands::affine::BlockAction,
    },
    /// Vigenère cipher over text.
    Vigenere {
        #[command(subcommand)]
        action: commands::vigenere::VigenereAction,
    },
    /// Cryptanalysis of Vigenère ciphertext.
    Analyze {
        #[command(subcommand)]
        action: commands::analyze::AnalyzeAction,
    },
}

// ---------------------------------------------------------------------------
// Global options passed to every command handler
// ---------------------------------------------------------------------------

/// Shared options threaded into command handlers.
pub struct GlobalOpts {
    pub json: bool,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let opts = GlobalOpts { json: cli.json };

    if let Err(e) = dispatch(opts, cli.command) {
        output::print_error(&e, cli.json);
        std::process::exit(1);
    }
}

fn dispatch(opts: GlobalOpts, cmd: Commands) -> std::result::Result<(), String> {
    match cmd {
        Commands::Affine { action } => commands::affine::run(action, &opts),
        Commands::AffineBlock { action } => commands::affine::run_block(action, &opts),
        Commands::Vigenere { action } => commands::vigenere::run(action, &opts),
        Commands::Analyze { action } => commands::analyze::run(action, &opts),
    }
}
