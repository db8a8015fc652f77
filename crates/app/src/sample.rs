//! Sample plaintext generation for the demo command.
//!
//! Generated phrases mix common words with a sprinkling of characters the
//! cipher cannot encode (digits and punctuation), so a demo shows both the
//! round trip and the drop policy.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WORDS: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "meet", "me", "at", "noon",
    "by", "old", "bridge", "bring", "map", "and", "lantern", "river", "north", "gate", "secret",
    "signal", "wait", "for", "zebra", "crossing", "yellow", "kite",
];

const NOISE: &[char] = &['1', '7', '!', ',', '.', '?'];

/// Generate a phrase of `words` words.
///
/// Roughly one word in eight is followed by a character outside the
/// alphabet. Same seed, same phrase.
pub fn generate_sample_text(seed: u64, words: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = String::new();

    for i in 0..words {
        if i > 0 {
            text.push(' ');
        }
        let word = WORDS[rng.gen_range(0..WORDS.len())];
        if rng.gen_bool(0.5) {
            capitalize_into(&mut text, word);
        } else {
            text.push_str(word);
        }
        if rng.gen_range(0..8) == 0 {
            text.push(NOISE[rng.gen_range(0..NOISE.len())]);
        }
    }

    text
}

fn capitalize_into(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}
