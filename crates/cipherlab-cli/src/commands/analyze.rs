//! Cryptanalysis commands: kasiski, ic, recover.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use cipherlab_analysis::{ic_estimate, kasiski_estimate, recover_key};
use cipherlab_cipher::{normalize, VigenereKey};
use cipherlab_types::config::{IcConfig, KasiskiConfig};
use cipherlab_types::{CleanedText, LanguageProfile};

use crate::{io, output, GlobalOpts};

// ---------------------------------------------------------------------------
// Shared arguments
// ---------------------------------------------------------------------------

/// Built-in language profiles.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Language {
    English,
    Spanish,
}

/// Ciphertext ingestion arguments.
#[derive(Args)]
pub struct TextArgs {
    /// Ciphertext file (defaults to stdin).
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Fold Latin accents to their base letters before cleaning.
    #[arg(long)]
    fold_accents: bool,
}

/// Language profile selection.
#[derive(Args)]
pub struct ProfileArgs {
    /// Target language.
    #[arg(long, value_enum, default_value = "english")]
    language: Language,

    /// JSON file with a custom 26-entry frequency table
    /// (overrides --language).
    #[arg(long)]
    profile: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum AnalyzeAction {
    /// Estimate the key length from repeated n-gram distances.
    Kasiski {
        #[command(flatten)]
        text: TextArgs,

        /// n-gram length to index.
        #[arg(long, default_value_t = 3)]
        ngram: usize,

        /// Discard repeat distances below this as noise.
        #[arg(long, default_value_t = 40)]
        min_distance: usize,

        /// Largest key length that may receive votes.
        #[arg(long, default_value_t = 30)]
        max_candidate: usize,
    },
    /// Score candidate key lengths by Index of Coincidence.
    Ic {
        #[command(flatten)]
        text: TextArgs,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Largest key length to score.
        #[arg(long, default_value_t = 30)]
        max_candidate: usize,
    },
    /// Recover the key by per-column frequency matching.
    Recover {
        #[command(flatten)]
        text: TextArgs,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Key length; estimated via Kasiski (IC fallback) when omitted.
        #[arg(short = 'n', long)]
        key_length: Option<usize>,

        /// Largest key length considered by the automatic estimate.
        #[arg(long, default_value_t = 30)]
        max_candidate: usize,

        /// Also decrypt the cleaned ciphertext with the recovered key.
        #[arg(long)]
        decrypt: bool,
    },
}

pub fn run(action: AnalyzeAction, opts: &GlobalOpts) -> std::result::Result<(), String> {
    match action {
        AnalyzeAction::Kasiski {
            text,
            ngram,
            min_distance,
            max_candidate,
        } => run_kasiski(opts, &text, ngram, min_distance, max_candidate),
        AnalyzeAction::Ic {
            text,
            profile,
            max_candidate,
        } => run_ic(opts, &text, &profile, max_candidate),
        AnalyzeAction::Recover {
            text,
            profile,
            key_length,
            max_candidate,
            decrypt,
        } => run_recover(opts, &text, &profile, key_length, max_candidate, decrypt),
    }
}

// ---------------------------------------------------------------------------
// Kasiski
// ---------------------------------------------------------------------------

fn run_kasiski(
    opts: &GlobalOpts,
    text: &TextArgs,
    ngram: usize,
    min_distance: usize,
    max_candidate: usize,
) -> std::result::Result<(), String> {
    let cleaned = clean_input(text)?;
    let config = KasiskiConfig {
        ngram_len: ngram,
        min_distance,
        max_candidate,
    };
    let report = kasiski_estimate(&cleaned, &config).map_err(|e| e.to_string())?;

    if opts.json {
        let value = serde_json::to_value(&report).map_err(|e| e.to_string())?;
        output::print_json_value(&value, true);
        return Ok(());
    }

    if report.is_inconclusive() {
        println!("no repeated {ngram}-grams survived filtering; result is inconclusive");
        println!("try a longer sample, a different n-gram length, or the ic estimator");
        return Ok(());
    }

    let group_rows: Vec<Vec<String>> = report
        .groups
        .iter()
        .map(|g| {
            vec![
                g.ngram.clone(),
                g.occurrences.to_string(),
                g.gcd.to_string(),
            ]
        })
        .collect();
    output::print_table(&["ngram", "repeats", "gcd"], &group_rows, false);
    println!();

    let vote_rows: Vec<Vec<String>> = report
        .candidates
        .iter()
        .map(|c| vec![c.length.to_string(), c.votes.to_string()])
        .collect();
    output::print_table(&["length", "votes"], &vote_rows, false);
    println!();

    if let Some(best) = report.best() {
        output::print_kv("estimated key length", &best.to_string(), false);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Index of Coincidence
// ---------------------------------------------------------------------------

fn run_ic(
    opts: &GlobalOpts,
    text: &TextArgs,
    profile_args: &ProfileArgs,
    max_candidate: usize,
) -> std::result::Result<(), String> {
    let cleaned = clean_input(text)?;
    let profile = load_profile(profile_args)?;
    let config = IcConfig { max_candidate };
    let report = ic_estimate(&cleaned, &config, &profile).map_err(|e| e.to_string())?;

    if opts.json {
        let value = serde_json::to_value(&report).map_err(|e| e.to_string())?;
        output::print_json_value(&value, true);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = report
        .scores
        .iter()
        .map(|s| {
            vec![
                s.length.to_string(),
                format!("{:.4}", s.avg_ic),
                format!("{:.4}", s.distance),
            ]
        })
        .collect();
    output::print_table(&["length", "avg ic", "distance"], &rows, false);
    println!();

    output::print_kv(
        "theoretical ic",
        &format!("{:.4}", report.theoretical),
        false,
    );
    if let Some(best) = report.best() {
        output::print_kv("estimated key length", &best.length.to_string(), false);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

fn run_recover(
    opts: &GlobalOpts,
    text: &TextArgs,
    profile_args: &ProfileArgs,
    key_length: Option<usize>,
    max_candidate: usize,
    decrypt: bool,
) -> std::result::Result<(), String> {
    let cleaned = clean_input(text)?;
    let profile = load_profile(profile_args)?;

    let (n, estimated_by) = match key_length {
        Some(n) => (n, "given"),
        None => estimate_length(&cleaned, &profile, max_candidate)?,
    };

    let recovered = recover_key(&cleaned, n, &profile).map_err(|e| e.to_string())?;

    let plaintext = if decrypt {
        let key = VigenereKey::new(&recovered.key).map_err(|e| e.to_string())?;
        Some(key.decrypt(cleaned.as_str()))
    } else {
        None
    };

    if opts.json {
        let value = serde_json::json!({
            "key_length": n,
            "estimated_by": estimated_by,
            "recovery": serde_json::to_value(&recovered).map_err(|e| e.to_string())?,
            "plaintext": plaintext,
        });
        output::print_json_value(&value, true);
        return Ok(());
    }

    output::print_kv("key length", &format!("{n} ({estimated_by})"), false);
    println!();

    let rows: Vec<Vec<String>> = recovered
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            vec![
                i.to_string(),
                ((b'A' + c.shift) as char).to_string(),
                c.count.to_string(),
                format!("{:.4}", c.score),
                if c.degenerate { "degenerate".into() } else { String::new() },
            ]
        })
        .collect();
    output::print_table(&["column", "letter", "letters", "score", "flags"], &rows, false);
    println!();

    output::print_kv("recovered key", &recovered.key, false);
    if let Some(from) = recovered.reduced_from {
        output::print_kv(
            "period reduction",
            &format!("{from} -> {}", recovered.key.len()),
            false,
        );
    }
    if let Some(plain) = plaintext {
        println!();
        println!("{plain}");
    }
    Ok(())
}

/// Estimates the key length: Kasiski first, IC as fallback.
fn estimate_length(
    cleaned: &CleanedText,
    profile: &LanguageProfile,
    max_candidate: usize,
) -> std::result::Result<(usize, &'static str), String> {
    let kasiski_config = KasiskiConfig {
        max_candidate,
        ..KasiskiConfig::default()
    };
    let report = kasiski_estimate(cleaned, &kasiski_config).map_err(|e| e.to_string())?;
    if let Some(n) = report.best() {
        return Ok((n, "kasiski"));
    }

    tracing::debug!("kasiski inconclusive, falling back to index of coincidence");
    let ic_config = IcConfig { max_candidate };
    let report = ic_estimate(cleaned, &ic_config, profile).map_err(|e| e.to_string())?;
    report
        .best()
        .map(|s| (s.length, "ic"))
        .ok_or_else(|| "could not estimate the key length; pass --key-length".to_string())
}

// ---------------------------------------------------------------------------
// Ingestion helpers
// ---------------------------------------------------------------------------

fn clean_input(args: &TextArgs) -> std::result::Result<CleanedText, String> {
    let raw = io::read_text(args.input.as_deref())?;
    let cleaned = if args.fold_accents {
        normalize::normalize_latin(&raw)
    } else {
        CleanedText::clean(&raw)
    };
    if cleaned.is_empty() {
        return Err("input contains no letters".into());
    }
    Ok(cleaned)
}

fn load_profile(args: &ProfileArgs) -> std::result::Result<LanguageProfile, String> {
    match &args.profile {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            let profile: LanguageProfile = serde_json::from_str(&json)
                .map_err(|e| format!("invalid profile file: {e}"))?;
            profile.validate().map_err(|e| e.to_string())?;
            Ok(profile)
        }
        None => Ok(match args.language {
            Language::English => LanguageProfile::english(),
            Language::Spanish => LanguageProfile::spanish(),
        }),
    }
}
