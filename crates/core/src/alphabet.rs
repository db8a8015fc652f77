//! The fixed base alphabet and its reference codes.
//!
//! The alphabet is the 26 uppercase letters followed by the space character,
//! 27 symbols in a fixed order. Each symbol owns one reference code in the
//! base table. Codes are built from a leading digit, a `#`, and a tail of
//! `-` and `.` characters:
//!
//! ```text
//! A 1#       H 4#---    O 4#...    V 5#-..-
//! B 2#-      I 4#--.    P 5#----   W 5#-...
//! C 2#.      J 4#-.-    Q 5#---.   X 5#.---
//! D 3#--     K 4#-..    R 5#--..   Y 5#.--.
//! E 3#-.     L 4#.--    S 5#--.-   Z 5#.-.-
//! F 3#.-     M 4#.-.    T 5#-.--   ' ' 5#----..
//! G 3#..     N 4#..-    U 5#-.-.
//! ```
//!
//! # Decodability
//!
//! Generated mappings only permute which symbol owns which code, so the code
//! strings themselves never change. Whether a stream of concatenated codes
//! can be split back apart is therefore a property of this table alone, and
//! [`validate_code_set`] checks it.
//!
//! The table is not strictly prefix-free: `5#----` is a prefix of
//! `5#----..`. The pair is harmless under longest-match decoding because the
//! leftover tail `..` cannot start any code, so the longer code always wins
//! when it is really there and can never swallow the start of a neighbour.

use crate::error::{CodeSetError, Result};
use std::collections::HashSet;
use std::fmt;

/// Number of symbols in the alphabet.
pub const ALPHABET_LEN: usize = 27;

/// The base table: every symbol paired with its reference code, in symbol order.
pub const BASE_TABLE: [(char, &str); ALPHABET_LEN] = [
    ('A', "1#"),
    ('B', "2#-"),
    ('C', "2#."),
    ('D', "3#--"),
    ('E', "3#-."),
    ('F', "3#.-"),
    ('G', "3#.."),
    ('H', "4#---"),
    ('I', "4#--."),
    ('J', "4#-.-"),
    ('K', "4#-.."),
    ('L', "4#.--"),
    ('M', "4#.-."),
    ('N', "4#..-"),
    ('O', "4#..."),
    ('P', "5#----"),
    ('Q', "5#---."),
    ('R', "5#--.."),
    ('S', "5#--.-"),
    ('T', "5#-.--"),
    ('U', "5#-.-."),
    ('V', "5#-..-"),
    ('W', "5#-..."),
    ('X', "5#.---"),
    ('Y', "5#.--."),
    ('Z', "5#.-.-"),
    (' ', "5#----.."),
];

/// One element of the alphabet: an uppercase letter `A`-`Z` or space.
///
/// Stored as the symbol's index into [`Symbol::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u8);

impl Symbol {
    /// Every symbol, in table order.
    pub const ALL: [Symbol; ALPHABET_LEN] = {
        let mut all = [Symbol(0); ALPHABET_LEN];
        let mut i = 0;
        while i < ALPHABET_LEN {
            all[i] = Symbol(i as u8);
            i += 1;
        }
        all
    };

    /// The space symbol.
    pub const SPACE: Symbol = Symbol(26);

    /// Look up the symbol for an (already uppercased) character.
    ///
    /// Lowercase letters are not symbols; callers normalize first.
    pub fn from_char(c: char) -> Option<Symbol> {
        match c {
            'A'..='Z' => Some(Symbol(c as u8 - b'A')),
            ' ' => Some(Symbol::SPACE),
            _ => None,
        }
    }

    /// Index of this symbol in [`Symbol::ALL`].
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The character this symbol stands for.
    pub fn as_char(self) -> char {
        BASE_TABLE[self.index()].0
    }

    /// The code this symbol owns in the base table.
    pub fn base_code(self) -> &'static str {
        BASE_TABLE[self.index()].1
    }
}

impl fmt::Display for Symbol {
    /// Letters print as themselves, space prints quoted as `' '`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Symbol::SPACE {
            f.write_str("' '")
        } else {
            write!(f, "{}", self.as_char())
        }
    }
}

/// Reference codes of the base table, in symbol order.
pub fn base_codes() -> Vec<&'static str> {
    BASE_TABLE.iter().map(|&(_, code)| code).collect()
}

/// Every pair `(shorter, longer)` of indices where `codes[shorter]` is a
/// proper prefix of `codes[longer]`.
pub fn prefix_pairs<S: AsRef<str>>(codes: &[S]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, short) in codes.iter().enumerate() {
        let short = short.as_ref();
        for (j, long) in codes.iter().enumerate() {
            let long = long.as_ref();
            if i != j && long.len() > short.len() && long.starts_with(short) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Check that a code set can be decoded by longest-match without ambiguity.
///
/// Codes must be non-empty and distinct. Where one code is a proper prefix
/// of another, the leftover tail must not begin with a character any code
/// starts with.
///
/// # Errors
/// Returns the first [`CodeSetError`] found.
pub fn validate_code_set<S: AsRef<str>>(codes: &[S]) -> Result<()> {
    let mut seen = HashSet::with_capacity(codes.len());
    let mut leading = HashSet::with_capacity(codes.len());

    for (index, code) in codes.iter().enumerate() {
        let code = code.as_ref();
        let Some(first) = code.chars().next() else {
            return Err(CodeSetError::EmptyCode { index }.into());
        };
        if !seen.insert(code) {
            return Err(CodeSetError::DuplicateCode {
                code: code.to_string(),
            }
            .into());
        }
        leading.insert(first);
    }

    for (shorter, longer) in prefix_pairs(codes) {
        let short = codes[shorter].as_ref();
        let long = codes[longer].as_ref();
        let tail_start = long[short.len()..].chars().next();
        if tail_start.is_some_and(|c| leading.contains(&c)) {
            return Err(CodeSetError::AmbiguousPrefix {
                shorter: short.to_string(),
                longer: long.to_string(),
            }
            .into());
        }
    }

    Ok(())
}
