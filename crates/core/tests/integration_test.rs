//! Integration tests for the full cipher flow.
//!
//! These tests drive the public API end to end: generate a mapping, encode,
//! decode, and check the laws that must hold for every generated mapping.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shuffle_cipher_core::{
    alphabet::{base_codes, prefix_pairs, validate_code_set, ALPHABET_LEN, BASE_TABLE},
    decode, encode, CipherMapping, CipherSession, Diagnostic, Symbol,
};
use std::collections::HashMap;

/// Full session flow: initialize, show key, encrypt, decrypt.
#[test]
fn test_session_roundtrip() {
    let mut session = CipherSession::with_seed(2024);
    let key = session.initialize_cipher();
    assert_eq!(key.lines().count(), 2 + ALPHABET_LEN);

    let secret = session.encrypt_text("Meet me at the usual place");
    assert!(secret.chars().all(|c| c.is_ascii_digit() || "#.-".contains(c)));
    assert_eq!(session.decrypt_text(&secret), "MEET ME AT THE USUAL PLACE");
}

/// A second session with the same seed can decrypt the first one's output.
#[test]
fn test_seed_reproduces_session() {
    let mut sender = CipherSession::with_seed(31337);
    sender.initialize_cipher();
    let secret = sender.encrypt_text("same key both ends");

    let mut receiver = CipherSession::with_seed(31337);
    receiver.initialize_cipher();
    assert_eq!(receiver.decrypt_text(&secret), "SAME KEY BOTH ENDS");
}

/// Key rendering is a pure function of the mapping.
#[test]
fn test_key_rendering_stable() {
    let mut session = CipherSession::with_seed(8);
    let first = session.initialize_cipher();
    assert_eq!(session.render_key().as_deref(), Some(first.as_str()));
    assert_eq!(session.render_key(), session.render_key());

    let mapping = session.mapping().unwrap();
    for (line, (symbol, code)) in first.lines().skip(2).zip(mapping.iter()) {
        assert_eq!(line, format!("{symbol} => {code}"));
    }
}

/// Dropped characters leave the same output as if they were never there.
#[test]
fn test_drop_policy() {
    let mapping = CipherMapping::generate(&mut ChaCha8Rng::seed_from_u64(1));
    let out = encode("AB1", &mapping);

    assert_eq!(out.text, encode("AB", &mapping).text);
    assert!(matches!(
        out.diagnostics.as_slice(),
        [Diagnostic::UnmappableSymbol { character: '1', .. }]
    ));
}

/// Unmatched positions become one `?` each and decoding carries on.
#[test]
fn test_fail_soft_decode() {
    let mapping = CipherMapping::base();
    assert_eq!(mapping.code_for(Symbol::ALL[0]), "1#");

    let out = decode("1#9#", &mapping);
    assert_eq!(out.text, "A??");
    assert_eq!(out.unmatched(), 2);
}

/// A longer code wins over its own prefix.
#[test]
fn test_longest_match() {
    let pairs = Symbol::ALL.into_iter().map(|s| {
        let code = match s.as_char() {
            'A' => "2#",
            'B' => "2#-",
            'C' => "1#",
            _ => s.base_code(),
        };
        (s, code)
    });
    let mapping = CipherMapping::from_pairs(pairs).unwrap();

    let out = decode("2#-1#", &mapping);
    assert_eq!(out.text, "BC");
    assert!(out.is_clean());
}

/// The base table decodes unambiguously, and its one prefix pair is P/space.
#[test]
fn test_base_code_set() {
    let codes = base_codes();
    validate_code_set(&codes).unwrap();

    let pairs: Vec<(char, char)> = prefix_pairs(&codes)
        .into_iter()
        .map(|(a, b)| (BASE_TABLE[a].0, BASE_TABLE[b].0))
        .collect();
    assert_eq!(pairs, vec![('P', ' ')]);

    // No code begins with a tail character, so a tail can never start a code
    assert!(codes.iter().all(|c| c.starts_with(|ch: char| ch.is_ascii_digit())));
}

/// Every generated mapping reuses the base codes, so it stays decodable.
#[test]
fn test_generated_mappings_decodable() {
    let mut rng = ChaCha8Rng::seed_from_u64(55);
    for _ in 0..50 {
        CipherMapping::generate(&mut rng).check_decodable().unwrap();
    }
}

/// Each symbol lands on each code position about equally often.
#[test]
fn test_shuffle_uniform() {
    const RUNS: usize = 27_000;
    let expected = (RUNS / ALPHABET_LEN) as f64;

    let index_of: HashMap<&str, usize> = base_codes()
        .into_iter()
        .enumerate()
        .map(|(i, c)| (c, i))
        .collect();

    let mut counts = [[0usize; ALPHABET_LEN]; ALPHABET_LEN];
    let mut rng = ChaCha8Rng::seed_from_u64(0xC0DE);
    for _ in 0..RUNS {
        let mapping = CipherMapping::generate(&mut rng);
        for (symbol, code) in mapping.iter() {
            counts[symbol.index()][index_of[code]] += 1;
        }
    }

    let mut chi_square = 0.0;
    for row in &counts {
        for &count in row {
            let diff = count as f64 - expected;
            // Six standard deviations is roughly 190
            assert!(diff.abs() < 250.0, "cell count {count} too far from {expected}");
            chi_square += diff * diff / expected;
        }
    }

    // 26 * 26 = 676 degrees of freedom; mean 676, sd about 37
    assert!(chi_square < 900.0, "chi-square {chi_square:.1} too large");
}

/// Strings of letters (either case) and spaces.
fn alphabet_text() -> impl Strategy<Value = String> {
    let chars: Vec<char> = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz "
        .chars()
        .collect();
    prop::collection::vec(prop::sample::select(chars), 0..200)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    /// decode(encode(text)) == uppercase(text) for every mapping.
    #[test]
    fn prop_roundtrip(seed in any::<u64>(), text in alphabet_text()) {
        let mapping = CipherMapping::generate(&mut ChaCha8Rng::seed_from_u64(seed));
        let encoded = encode(&text, &mapping);
        prop_assert!(encoded.is_clean());

        let decoded = decode(&encoded.text, &mapping);
        prop_assert!(decoded.is_clean());
        prop_assert_eq!(decoded.text, text.to_uppercase());
    }

    /// Forward and inverse views are exact inverses.
    #[test]
    fn prop_bijection(seed in any::<u64>()) {
        let mapping = CipherMapping::generate(&mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(mapping.len(), ALPHABET_LEN);
        prop_assert_eq!(mapping.inverse_len(), ALPHABET_LEN);
        for symbol in Symbol::ALL {
            prop_assert_eq!(mapping.symbol_for(mapping.code_for(symbol)), Some(symbol));
        }
    }

    /// Decoding arbitrary input terminates and covers every position.
    #[test]
    fn prop_decode_total(seed in any::<u64>(), input in ".{0,100}") {
        let mapping = CipherMapping::generate(&mut ChaCha8Rng::seed_from_u64(seed));
        let out = decode(&input, &mapping);

        // Each output char consumed at least one input char
        prop_assert!(out.text.chars().count() <= input.chars().count());
        prop_assert_eq!(out.unmatched(), out.text.chars().filter(|&c| c == '?').count());
    }
}
