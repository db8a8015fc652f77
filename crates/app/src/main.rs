//! shuffle-cipher binary.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session with a fresh random key
//! shuffle-cipher
//!
//! # Round trip through two runs sharing a seed
//! shuffle-cipher --seed 42 encrypt "meet me at noon" | shuffle-cipher --seed 42 decrypt
//!
//! # Show the key for a seed
//! shuffle-cipher --seed 42 key
//! ```
//!
//! Cipher output goes to stdout. Logs, the seed notice and summaries go to
//! stderr so output can be piped.

mod config;
mod repl;
mod sample;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Cli, Command, Config};
use repl::Repl;
use shuffle_cipher_core::CipherSession;
use std::io::{self, Read, Write};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse());

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    if config.print_config {
        eprint!("{}", config.describe());
    }
    if !config.seed_given && config.command != Command::Repl {
        eprintln!("seed: {} (pass --seed {} to reuse this key)", config.seed, config.seed);
    }

    tracing::info!(seed = config.seed, command = ?config.command, "starting session");
    let mut session = CipherSession::with_seed(config.seed);
    let key = session.initialize_cipher();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.print_key {
        write!(out, "{key}")?;
    }

    match &config.command {
        Command::Key => {
            if !config.print_key {
                write!(out, "{key}")?;
            }
        }
        Command::Encrypt { text } => {
            let plaintext = text_or_stdin(text)?;
            writeln!(out, "{}", session.encrypt_text(&plaintext))?;
        }
        Command::Decrypt { text } => {
            let ciphertext = text_or_stdin(text)?;
            writeln!(out, "{}", session.decrypt_text(ciphertext.trim()))?;
        }
        Command::Demo { words } => run_demo(&mut session, config.seed, *words, &mut out)?,
        Command::Repl => {
            let stdin = io::stdin();
            Repl::new(&mut session, stdin.lock(), &mut out)
                .run()
                .context("interactive session failed")?;
        }
    }
    out.flush()?;

    if config.print_metrics && matches!(config.command, Command::Demo { .. } | Command::Repl) {
        eprint!("\n{}", session.metrics().summary());
    }

    Ok(())
}

/// Join command-line words, or read all of stdin when there are none.
fn text_or_stdin(words: &[String]) -> Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read text from stdin")?;
    Ok(input.trim_end_matches(['\n', '\r']).to_string())
}

/// Round-trip a generated phrase and report whether it survived.
fn run_demo(
    session: &mut CipherSession,
    seed: u64,
    words: usize,
    out: &mut impl Write,
) -> Result<()> {
    let plaintext = sample::generate_sample_text(seed, words);
    let encrypted = session.encrypt(&plaintext);
    let decrypted = session.decrypt_text(&encrypted.text);

    // Dropped characters are expected to be missing from the round trip
    let expected: String = plaintext
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || *c == ' ')
        .collect();

    writeln!(out, "Plaintext:  {plaintext}")?;
    writeln!(out, "Encrypted:  {}", encrypted.text)?;
    writeln!(out, "Decrypted:  {decrypted}")?;
    writeln!(out, "Skipped:    {} character(s)", encrypted.dropped())?;

    if decrypted == expected {
        writeln!(out, "Verification: PASSED ✓")?;
        Ok(())
    } else {
        writeln!(out, "Verification: FAILED ✗")?;
        anyhow::bail!("round trip mismatch: expected {expected:?}, got {decrypted:?}")
    }
}
