//! Metrics collection and reporting for a cipher session.
//!
//! Tracks how the session has been used:
//! - Mapping generations (initial and reshuffles)
//! - Encode/decode call counts and character volumes
//! - Degradations (dropped characters, unmatched positions)
//!
//! # Thread Safety
//!
//! The `Metrics` struct is NOT thread-safe. It is owned by the session and
//! updated explicitly after each operation.

use crate::transcoder::Transcript;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

/// Counters for one cipher session.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// When the session started
    pub start_time: Instant,

    // === Generator ===
    /// Mappings generated (1 after initialization, +1 per reshuffle)
    pub mappings_generated: u64,

    // === Encode ===
    /// Encode calls served
    pub encode_calls: u64,

    /// Plaintext characters received by encode
    pub plaintext_chars_in: u64,

    /// Ciphertext characters produced by encode
    pub ciphertext_chars_out: u64,

    /// Characters dropped because they are outside the alphabet
    pub symbols_dropped: u64,

    // === Decode ===
    /// Decode calls served
    pub decode_calls: u64,

    /// Ciphertext characters received by decode
    pub ciphertext_chars_in: u64,

    /// Plaintext characters produced by decode (placeholders included)
    pub plaintext_chars_out: u64,

    /// Positions no code matched
    pub positions_unmatched: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            mappings_generated: 0,
            encode_calls: 0,
            plaintext_chars_in: 0,
            ciphertext_chars_out: 0,
            symbols_dropped: 0,
            decode_calls: 0,
            ciphertext_chars_in: 0,
            plaintext_chars_out: 0,
            positions_unmatched: 0,
        }
    }

    /// Record a freshly published mapping.
    pub fn record_generation(&mut self) {
        self.mappings_generated += 1;
    }

    /// Record one encode call.
    pub fn record_encode(&mut self, input: &str, out: &Transcript) {
        self.encode_calls += 1;
        self.plaintext_chars_in += count_chars(input);
        self.ciphertext_chars_out += count_chars(&out.text);
        self.symbols_dropped += out.dropped() as u64;
    }

    /// Record one decode call.
    pub fn record_decode(&mut self, input: &str, out: &Transcript) {
        self.decode_calls += 1;
        self.ciphertext_chars_in += count_chars(input);
        self.plaintext_chars_out += count_chars(&out.text);
        self.positions_unmatched += out.unmatched() as u64;
    }

    /// Time since the session started.
    pub fn duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Ciphertext characters per plaintext character kept by encode.
    ///
    /// Returns 0.0 if nothing was encoded.
    pub fn expansion_ratio(&self) -> f64 {
        let kept = self.plaintext_chars_in.saturating_sub(self.symbols_dropped);
        if kept == 0 {
            0.0
        } else {
            self.ciphertext_chars_out as f64 / kept as f64
        }
    }

    /// Fraction of decoded characters that are placeholders.
    pub fn unmatched_rate(&self) -> f64 {
        if self.plaintext_chars_out == 0 {
            0.0
        } else {
            self.positions_unmatched as f64 / self.plaintext_chars_out as f64
        }
    }

    /// Human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(s, "=== Session Summary ===");
        let _ = writeln!(s, "Duration: {} ms", self.duration().as_millis());
        let _ = writeln!(s, "Mappings generated: {}", self.mappings_generated);
        let _ = writeln!(s);
        let _ = writeln!(s, "=== Encode ===");
        let _ = writeln!(s, "Calls: {}", self.encode_calls);
        let _ = writeln!(s, "Characters in: {}", self.plaintext_chars_in);
        let _ = writeln!(s, "Characters out: {}", self.ciphertext_chars_out);
        let _ = writeln!(s, "Dropped: {}", self.symbols_dropped);
        let _ = writeln!(s, "Expansion: {:.2}x", self.expansion_ratio());
        let _ = writeln!(s);
        let _ = writeln!(s, "=== Decode ===");
        let _ = writeln!(s, "Calls: {}", self.decode_calls);
        let _ = writeln!(s, "Characters in: {}", self.ciphertext_chars_in);
        let _ = writeln!(s, "Characters out: {}", self.plaintext_chars_out);
        let _ = writeln!(
            s,
            "Unmatched: {} ({:.2}%)",
            self.positions_unmatched,
            self.unmatched_rate() * 100.0
        );
        s
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             mappings_generated={}\n\
             encode_calls={}\n\
             plaintext_chars_in={}\n\
             ciphertext_chars_out={}\n\
             symbols_dropped={}\n\
             expansion_ratio={:.4}\n\
             decode_calls={}\n\
             ciphertext_chars_in={}\n\
             plaintext_chars_out={}\n\
             positions_unmatched={}\n\
             unmatched_rate={:.4}\n",
            self.duration().as_millis(),
            self.mappings_generated,
            self.encode_calls,
            self.plaintext_chars_in,
            self.ciphertext_chars_out,
            self.symbols_dropped,
            self.expansion_ratio(),
            self.decode_calls,
            self.ciphertext_chars_in,
            self.plaintext_chars_out,
            self.positions_unmatched,
            self.unmatched_rate(),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn count_chars(s: &str) -> u64 {
    s.chars().count() as u64
}
