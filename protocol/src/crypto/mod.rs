//! # Cryptographic Primitives for Tally
//!
//! Every signature in the wallet flows through here.
//!
//! - **Ed25519** ([`crate::config::SIGNING_ALGORITHM`]) for signatures, via
//!   `ed25519-dalek`.
//! - **SHA-256** ([`crate::config::DIGEST_ALGORITHM`]) for the signing digest.
//! - A small canonical-encoding trait so that the bytes fed to sign and
//!   verify never depend on map iteration order.
//!
//! Everything here is a thin, typed wrapper around audited implementations.

pub mod canonical;
pub mod hash;
pub mod keys;
pub mod signatures;

pub use canonical::Signable;
pub use hash::{sha256, sha256_array, signing_digest};
pub use keys::{KeyError, Signature, WalletKeypair, WalletPublicKey};
pub use signatures::{verify_signature, Ed25519Verifier, SignatureVerifier};
