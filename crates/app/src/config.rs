//! Configuration for the shuffle-cipher application.
//!
//! Parses command-line arguments and resolves defaults, including a random
//! seed when none is given.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments (it starts an interactive
//! session). The seed is always reported, so any run can be repeated: a
//! message encrypted under seed N decrypts under seed N.

use clap::{Parser, Subcommand};
use std::fmt::Write as _;

/// Randomized substitution cipher (an obfuscation toy, not real encryption)
#[derive(Parser, Debug)]
#[command(name = "shuffle-cipher")]
#[command(about = "Encode text with a randomly shuffled letter-to-code key")]
#[command(version)]
pub struct Cli {
    /// Random seed for the key (default: random, printed to stderr)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Print the cipher key before running the command
    #[arg(long)]
    pub print_key: bool,

    /// Don't print the session summary at the end
    #[arg(long)]
    pub no_metrics: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to do with the session.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the cipher key
    Key,

    /// Encode text (joined by spaces; read from stdin when omitted)
    Encrypt { text: Vec<String> },

    /// Decode text (joined by spaces; read from stdin when omitted)
    Decrypt { text: Vec<String> },

    /// Encrypt and decrypt a generated sample phrase
    Demo {
        /// Number of words in the sample phrase
        #[arg(long, default_value_t = 12)]
        words: usize,
    },

    /// Interactive session (the default)
    Repl,
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seed for the session RNG
    pub seed: u64,

    /// Whether the seed came from the command line
    pub seed_given: bool,

    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,

    /// Command to run
    pub command: Command,

    // === Behavior ===
    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print the key before running
    pub print_key: bool,

    /// Whether to print the session summary at the end
    pub print_metrics: bool,
}

impl Config {
    /// Resolve parsed arguments into a configuration.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            seed: cli.seed.unwrap_or_else(rand::random),
            seed_given: cli.seed.is_some(),
            log_level: cli.log_level,
            command: cli.command.unwrap_or(Command::Repl),
            print_config: cli.print_config,
            print_key: cli.print_key,
            print_metrics: !cli.no_metrics,
        }
    }

    /// The configuration in human-readable form.
    pub fn describe(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "=== Configuration ===");
        let _ = writeln!(
            s,
            "Seed: {} ({})",
            self.seed,
            if self.seed_given { "given" } else { "random" }
        );
        let _ = writeln!(s, "Command: {:?}", self.command);
        let _ = writeln!(s, "Log level: {}", self.log_level);
        let _ = writeln!(s, "Print key: {}", self.print_key);
        let _ = writeln!(s, "Print metrics: {}", self.print_metrics);
        s
    }
}
