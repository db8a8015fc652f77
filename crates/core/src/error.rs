//! Error types for the shuffle cipher.
//!
//! Construction and validation failures are structured errors returned as
//! `Err`. Transcoding never fails: characters that cannot be encoded and
//! sequences that cannot be decoded are reported as [`Diagnostic`] values
//! alongside the (degraded) output instead.

use thiserror::Error;

/// Top-level error type for fallible operations in the system.
#[derive(Debug, Error)]
pub enum Error {
    /// An explicit symbol-to-code assignment is not a bijection
    #[error("invalid cipher mapping: {0}")]
    InvalidMapping(#[from] MappingError),

    /// A code set cannot be decoded unambiguously
    #[error("invalid code set: {0}")]
    CodeSet(#[from] CodeSetError),
}

/// Reasons an explicit assignment fails to form a cipher mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Not every symbol of the alphabet received a code
    #[error("expected {expected} symbols, got {actual}")]
    WrongSymbolCount { expected: usize, actual: usize },

    /// The same symbol was assigned twice
    #[error("symbol {symbol:?} assigned more than once")]
    DuplicateSymbol { symbol: char },

    /// Two symbols share one code
    #[error("code {code:?} assigned to more than one symbol")]
    DuplicateCode { code: String },

    /// A symbol was given the empty code
    #[error("symbol {symbol:?} has an empty code")]
    EmptyCode { symbol: char },
}

/// Reasons a set of codes cannot be decoded by longest-match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeSetError {
    /// The same code appears twice
    #[error("duplicate code {code:?}")]
    DuplicateCode { code: String },

    /// The empty string is not a usable code
    #[error("empty code at index {index}")]
    EmptyCode { index: usize },

    /// `shorter` is a prefix of `longer` and the leftover tail can itself
    /// start a code, so a concatenation may split the wrong way
    #[error("code {shorter:?} is an ambiguous prefix of {longer:?}")]
    AmbiguousPrefix { shorter: String, longer: String },
}

/// Non-fatal conditions reported while transcoding.
///
/// Encoding drops unmappable characters, decoding substitutes a placeholder
/// for unmatched positions. Both keep going and record one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Character outside the 27-symbol alphabet, skipped during encode
    #[error("character {character:?} at position {position} not found in cipher map, skipping")]
    UnmappableSymbol { character: char, position: usize },

    /// No code matches at this cursor position during decode
    #[error("could not decode sequence starting at position {position}: {snippet:?}")]
    UnmatchedSequence { position: usize, snippet: String },
}

impl Diagnostic {
    /// Character position in the input the diagnostic refers to.
    pub fn position(&self) -> usize {
        match self {
            Diagnostic::UnmappableSymbol { position, .. }
            | Diagnostic::UnmatchedSequence { position, .. } => *position,
        }
    }
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
