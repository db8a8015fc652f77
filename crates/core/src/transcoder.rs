//! Encoding plaintext into codes and decoding codes back into plaintext.
//!
//! Both directions are pure functions of their input and a [`CipherMapping`].
//! Neither ever fails: problems are reported as [`Diagnostic`] values next to
//! the output, and logged at `warn`.
//!
//! # Encode
//!
//! Input is uppercased, then every character is replaced by its code. Codes
//! are concatenated with no separator. Characters outside the alphabet are
//! dropped.
//!
//! # Decode
//!
//! A cursor scans the input left to right. At each position the longest code
//! that matches the remaining input wins. When nothing matches, a `?` is
//! emitted and the cursor moves forward by one character. The cursor always
//! advances, so decoding always terminates and consumes the whole input.
//!
//! Positions in diagnostics are character indices, not byte offsets.

use crate::alphabet::Symbol;
use crate::cipher::CipherMapping;
use crate::error::Diagnostic;

/// Emitted in place of each input position no code matches.
pub const PLACEHOLDER: char = '?';

/// How many characters of unmatched input a diagnostic quotes.
const SNIPPET_LEN: usize = 10;

/// Output of an encode or decode, plus what went wrong along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    /// The transcoded text
    pub text: String,

    /// Non-fatal problems, in input order
    pub diagnostics: Vec<Diagnostic>,
}

impl Transcript {
    /// True when nothing was dropped or substituted.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of characters dropped during encode.
    pub fn dropped(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnmappableSymbol { .. }))
            .count()
    }

    /// Number of positions replaced by the placeholder during decode.
    pub fn unmatched(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnmatchedSequence { .. }))
            .count()
    }

    /// Take the text, discarding diagnostics.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Encode `plaintext` with `mapping`.
///
/// Case-insensitive. Each character outside the alphabet is skipped and
/// recorded as [`Diagnostic::UnmappableSymbol`].
pub fn encode(plaintext: &str, mapping: &CipherMapping) -> Transcript {
    let normalized = plaintext.to_uppercase();
    let mut out = Transcript {
        text: String::with_capacity(normalized.len() * mapping.max_code_len()),
        diagnostics: Vec::new(),
    };

    for (position, character) in normalized.chars().enumerate() {
        match Symbol::from_char(character) {
            Some(symbol) => out.text.push_str(mapping.code_for(symbol)),
            None => {
                tracing::warn!(
                    character = ?character,
                    position,
                    "character not found in cipher map, skipping"
                );
                out.diagnostics.push(Diagnostic::UnmappableSymbol {
                    character,
                    position,
                });
            }
        }
    }

    out
}

/// Decode `ciphertext` with `mapping` using longest-match.
///
/// Each unmatched position yields one [`PLACEHOLDER`] and one
/// [`Diagnostic::UnmatchedSequence`].
pub fn decode(ciphertext: &str, mapping: &CipherMapping) -> Transcript {
    let mut out = Transcript::default();

    // Byte offset for slicing, character index for reporting
    let mut cursor = 0;
    let mut position = 0;

    while cursor < ciphertext.len() {
        let rest = &ciphertext[cursor..];

        let matched = mapping
            .candidates()
            .iter()
            .find(|(code, _)| rest.starts_with(code.as_str()));

        match matched {
            Some((code, symbol)) => {
                out.text.push(symbol.as_char());
                cursor += code.len();
                position += code.chars().count();
            }
            None => {
                let snippet: String = rest.chars().take(SNIPPET_LEN).collect();
                tracing::warn!(position, snippet = %snippet, "could not decode sequence");
                out.diagnostics
                    .push(Diagnostic::UnmatchedSequence { position, snippet });
                out.text.push(PLACEHOLDER);

                // rest is non-empty inside the loop
                cursor += rest.chars().next().map_or(1, char::len_utf8);
                position += 1;
            }
        }
    }

    out
}
