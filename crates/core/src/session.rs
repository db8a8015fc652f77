//! The cipher session: owner of the current mapping.
//!
//! A session holds the RNG used to generate mappings, the mapping currently
//! in force, and usage metrics. Front ends drive it through three commands:
//! [`CipherSession::initialize_cipher`], [`CipherSession::encrypt_text`] and
//! [`CipherSession::decrypt_text`].
//!
//! # Publishing
//!
//! The current mapping lives behind an `Arc`. Generating a new one builds the
//! complete value first and then replaces the `Arc` in a single assignment.
//! Anyone holding a snapshot from [`CipherSession::mapping`] keeps the old
//! mapping intact, so a reader never observes a mix of two mappings.
//!
//! # Determinism
//!
//! The RNG is a ChaCha8 seeded from a `u64`. The same seed produces the same
//! sequence of mappings, which is how a later run can decrypt the output of
//! an earlier one.

use crate::cipher::CipherMapping;
use crate::metrics::Metrics;
use crate::transcoder::{self, Transcript};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// A cipher session.
#[derive(Debug)]
pub struct CipherSession {
    seed: u64,
    rng: ChaCha8Rng,
    current: Option<Arc<CipherMapping>>,
    metrics: Metrics,
}

impl CipherSession {
    /// Create a session whose mappings derive from `seed`.
    ///
    /// No mapping exists until [`CipherSession::initialize_cipher`] runs or
    /// the first encrypt/decrypt asks for one.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            current: None,
            metrics: Metrics::new(),
        }
    }

    /// Create a session with a random seed.
    pub fn from_entropy() -> Self {
        Self::with_seed(rand::random())
    }

    /// Seed this session was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate and publish a new mapping, returning its rendered key.
    ///
    /// Calling this again re-randomizes the session.
    pub fn initialize_cipher(&mut self) -> String {
        self.publish().render_key()
    }

    /// Build a complete mapping, then swap it in.
    fn publish(&mut self) -> Arc<CipherMapping> {
        let mapping = Arc::new(CipherMapping::generate(&mut self.rng));
        self.current = Some(Arc::clone(&mapping));
        self.metrics.record_generation();

        tracing::info!(
            seed = self.seed,
            generation = self.metrics.mappings_generated,
            "cipher initialized"
        );
        mapping
    }

    /// Replace the current mapping with a fresh one.
    pub fn reshuffle(&mut self) -> String {
        self.initialize_cipher()
    }

    /// Snapshot of the current mapping, if one has been generated.
    pub fn mapping(&self) -> Option<Arc<CipherMapping>> {
        self.current.clone()
    }

    /// Rendered key of the current mapping, if one has been generated.
    pub fn render_key(&self) -> Option<String> {
        self.current.as_ref().map(|m| m.render_key())
    }

    /// Usage metrics so far.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Current mapping, generating one first if the session has none.
    fn ensure_mapping(&mut self) -> Arc<CipherMapping> {
        if let Some(mapping) = &self.current {
            return Arc::clone(mapping);
        }
        tracing::debug!("no mapping yet, initializing on first use");
        self.publish()
    }

    /// Encode with the current mapping, keeping diagnostics.
    pub fn encrypt(&mut self, plaintext: &str) -> Transcript {
        let mapping = self.ensure_mapping();
        let out = transcoder::encode(plaintext, &mapping);
        self.metrics.record_encode(plaintext, &out);
        out
    }

    /// Decode with the current mapping, keeping diagnostics.
    pub fn decrypt(&mut self, ciphertext: &str) -> Transcript {
        let mapping = self.ensure_mapping();
        let out = transcoder::decode(ciphertext, &mapping);
        self.metrics.record_decode(ciphertext, &out);
        out
    }

    /// Encode with the current mapping.
    pub fn encrypt_text(&mut self, plaintext: &str) -> String {
        self.encrypt(plaintext).into_text()
    }

    /// Decode with the current mapping; unmatched positions become `?`.
    pub fn decrypt_text(&mut self, ciphertext: &str) -> String {
        self.decrypt(ciphertext).into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_no_mapping() {
        let session = CipherSession::with_seed(1);
        assert!(session.mapping().is_none());
        assert!(session.render_key().is_none());
        assert_eq!(session.seed(), 1);
    }

    #[test]
    fn test_initialize_returns_current_key() {
        let mut session = CipherSession::with_seed(1);
        let key = session.initialize_cipher();
        assert_eq!(session.render_key(), Some(key));
        assert_eq!(session.metrics().mappings_generated, 1);
    }

    #[test]
    fn test_same_seed_same_mappings() {
        let mut a = CipherSession::with_seed(77);
        let mut b = CipherSession::with_seed(77);
        assert_eq!(a.initialize_cipher(), b.initialize_cipher());
        assert_eq!(a.reshuffle(), b.reshuffle());
    }

    #[test]
    fn test_lazy_initialization() {
        let mut session = CipherSession::with_seed(5);
        let encrypted = session.encrypt_text("hi");
        assert!(session.mapping().is_some());
        assert_eq!(session.decrypt_text(&encrypted), "HI");
        assert_eq!(session.metrics().mappings_generated, 1);
    }

    #[test]
    fn test_snapshot_survives_reshuffle() {
        let mut session = CipherSession::with_seed(9);
        session.initialize_cipher();
        let before = session.mapping().unwrap();
        let encrypted = session.encrypt_text("attack at dawn");

        session.reshuffle();
        let after = session.mapping().unwrap();
        assert!(!Arc::ptr_eq(&before, &after));

        // The held snapshot still decodes what it encoded
        let decoded = transcoder::decode(&encrypted, &before);
        assert_eq!(decoded.text, "ATTACK AT DAWN");
    }

    #[test]
    fn test_metrics_track_calls() {
        let mut session = CipherSession::with_seed(3);
        session.initialize_cipher();
        let out = session.encrypt_text("AB1");
        session.decrypt_text(&out);
        session.decrypt_text("9#");

        let metrics = session.metrics();
        assert_eq!(metrics.encode_calls, 1);
        assert_eq!(metrics.symbols_dropped, 1);
        assert_eq!(metrics.decode_calls, 2);
        assert!(metrics.positions_unmatched >= 1);
    }
}
