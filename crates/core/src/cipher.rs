//! Cipher mapping generation.
//!
//! A [`CipherMapping`] is a bijection between the 27 alphabet symbols and the
//! 27 reference codes of the base table. A fresh mapping is produced by an
//! unbiased Fisher-Yates shuffle of the code list, zipped against the fixed
//! symbol order.
//!
//! # Views
//!
//! The mapping is an immutable value exposing both directions at once:
//! - forward: symbol -> code (array indexed by symbol)
//! - inverse: code -> symbol (hash map)
//!
//! plus the decode candidate list, codes sorted longest first. All three are
//! built together in one constructor and never mutated afterwards, so they
//! cannot drift apart.
//!
//! # Determinism
//!
//! Generation takes the RNG as a parameter. Given a seeded ChaCha8 RNG the
//! resulting mapping is reproducible.

use crate::alphabet::{base_codes, validate_code_set, Symbol, ALPHABET_LEN};
use crate::error::{MappingError, Result};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// Header line of the rendered key.
const KEY_HEADER: &str = "Letter => Code";

/// Rule printed under the header.
const KEY_RULE: &str = "--------------";

/// Shuffle a slice in place so every permutation is equally likely.
///
/// Walks the unprocessed boundary down from the end, swapping the element at
/// the boundary with a uniformly chosen element at or before it.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for boundary in (1..items.len()).rev() {
        let pick = rng.gen_range(0..=boundary);
        items.swap(boundary, pick);
    }
}

/// A bijection between alphabet symbols and reference codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherMapping {
    /// Code owned by each symbol, indexed by `Symbol::index`
    forward: Vec<String>,

    /// Symbol owning each code
    inverse: HashMap<String, Symbol>,

    /// Codes with their symbols, longest first (ties in lexical order)
    candidates: Vec<(String, Symbol)>,
}

impl CipherMapping {
    /// Generate a randomized mapping over the base table's codes.
    ///
    /// The assigned codes are exactly the base codes, permuted; nothing is
    /// invented or dropped.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut codes = base_codes();
        shuffle_in_place(&mut codes, rng);

        let mapping = Self::build(codes.into_iter().map(str::to_string).collect());
        tracing::debug!(symbols = mapping.len(), "generated cipher mapping");
        mapping
    }

    /// The identity mapping: every symbol owns its base table code.
    pub fn base() -> Self {
        Self::build(base_codes().into_iter().map(str::to_string).collect())
    }

    /// Build a mapping from an explicit symbol-to-code assignment.
    ///
    /// Every symbol must appear exactly once and every code must be distinct
    /// and non-empty. Decodability of the code set is not checked here; see
    /// [`CipherMapping::check_decodable`].
    ///
    /// # Errors
    /// Returns `Error::InvalidMapping` when the assignment is not a bijection.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Symbol, S)>,
        S: Into<String>,
    {
        let mut forward: Vec<Option<String>> = vec![None; ALPHABET_LEN];
        let mut codes_seen: HashMap<String, Symbol> = HashMap::new();
        let mut count = 0;

        for (symbol, code) in pairs {
            let code = code.into();
            count += 1;

            if code.is_empty() {
                return Err(MappingError::EmptyCode {
                    symbol: symbol.as_char(),
                }
                .into());
            }
            if forward[symbol.index()].is_some() {
                return Err(MappingError::DuplicateSymbol {
                    symbol: symbol.as_char(),
                }
                .into());
            }
            if codes_seen.insert(code.clone(), symbol).is_some() {
                return Err(MappingError::DuplicateCode { code }.into());
            }
            forward[symbol.index()] = Some(code);
        }

        if count != ALPHABET_LEN {
            return Err(MappingError::WrongSymbolCount {
                expected: ALPHABET_LEN,
                actual: count,
            }
            .into());
        }

        // With 27 distinct symbols inserted every slot is filled
        Ok(Self::build(forward.into_iter().flatten().collect()))
    }

    /// Assemble all three views from codes listed in symbol order.
    fn build(forward: Vec<String>) -> Self {
        debug_assert_eq!(forward.len(), ALPHABET_LEN);

        let inverse: HashMap<String, Symbol> = forward
            .iter()
            .zip(Symbol::ALL)
            .map(|(code, symbol)| (code.clone(), symbol))
            .collect();

        let mut candidates: Vec<(String, Symbol)> = inverse
            .iter()
            .map(|(code, &symbol)| (code.clone(), symbol))
            .collect();
        candidates.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self {
            forward,
            inverse,
            candidates,
        }
    }

    /// Check that the codes of this mapping decode unambiguously.
    pub fn check_decodable(&self) -> Result<()> {
        validate_code_set(&self.forward)
    }

    /// Code owned by `symbol`.
    pub fn code_for(&self, symbol: Symbol) -> &str {
        &self.forward[symbol.index()]
    }

    /// Symbol owning `code`, if any.
    pub fn symbol_for(&self, code: &str) -> Option<Symbol> {
        self.inverse.get(code).copied()
    }

    /// Decode candidates, longest code first.
    pub fn candidates(&self) -> &[(String, Symbol)] {
        &self.candidates
    }

    /// Length in characters of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.candidates
            .first()
            .map_or(0, |(code, _)| code.chars().count())
    }

    /// Iterate `(symbol, code)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> + '_ {
        Symbol::ALL
            .into_iter()
            .zip(self.forward.iter().map(String::as_str))
    }

    /// Number of symbols mapped (always the alphabet size).
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Always false; a mapping covers the whole alphabet.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Number of entries in the inverse view.
    pub fn inverse_len(&self) -> usize {
        self.inverse.len()
    }

    /// Human-readable key: a header, a rule, then one `X => code` line per
    /// symbol in alphabet order.
    pub fn render_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CipherMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{KEY_HEADER}")?;
        writeln!(f, "{KEY_RULE}")?;
        for (symbol, code) in self.iter() {
            writeln!(f, "{symbol} => {code}")?;
        }
        Ok(())
    }
}
