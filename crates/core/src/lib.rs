//! shuffle-cipher-core: a randomized letter-to-code substitution cipher
//!
//! This library provides the core of a small obfuscation toy that:
//! - Holds a fixed table of 27 symbols (A-Z and space) and their codes
//! - Generates a random bijection between symbols and codes per session
//! - Encodes text into concatenated codes and decodes it back
//!
//! It is not a secure cipher.
//!
//! # Architecture
//!
//! - `alphabet`: the fixed symbol/code table and code-set validation
//! - `cipher`: mapping generation (unbiased shuffle) and key rendering
//! - `transcoder`: encode and longest-match decode
//! - `session`: owner of the current mapping, the front-end entry point
//! - `metrics`: usage counters for a session
//!
//! # Design Principles
//!
//! - **No panics**: transcoding degrades (drops or `?`) instead of failing
//! - **Immutable mappings**: both views are built once and never mutated
//! - **Deterministic**: seeded randomness makes sessions reproducible
//! - **Observable**: every degradation is logged and returned as a diagnostic
//!
//! # Example
//! ```
//! use shuffle_cipher_core::CipherSession;
//!
//! let mut session = CipherSession::with_seed(42);
//! let key = session.initialize_cipher();
//! assert!(key.starts_with("Letter => Code"));
//!
//! let secret = session.encrypt_text("Hello World");
//! assert_eq!(session.decrypt_text(&secret), "HELLO WORLD");
//! ```

pub mod alphabet;
pub mod cipher;
pub mod error;
pub mod metrics;
pub mod session;
pub mod transcoder;

// Re-export commonly used types
pub use alphabet::Symbol;
pub use cipher::CipherMapping;
pub use error::{Diagnostic, Error, Result};
pub use session::CipherSession;
pub use transcoder::{decode, encode, Transcript};
