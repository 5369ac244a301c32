//! # Signature Verification
//!
//! The transaction core never talks to ed25519-dalek directly when it checks
//! a signature. It goes through a [`SignatureVerifier`], so validation can be
//! exercised against a stub verifier and a different scheme could be slotted
//! in without touching the validation rules.
//!
//! The default [`Ed25519Verifier`] mirrors [`crate::wallet::Wallet::sign`]:
//! SHA-256 the canonical bytes, then check the Ed25519 signature over that
//! digest with the public key parsed from the hex address.

use super::canonical::Signable;
use super::hash::sha256_array;
use super::keys::{Signature, WalletPublicKey};

/// Verification primitive consumed by transaction validation.
pub trait SignatureVerifier: Send + Sync {
    /// Returns `true` when `signature` was produced by the owner of `address`
    /// over `canonical_bytes`. Malformed addresses or signatures are `false`.
    fn verify(&self, address: &str, canonical_bytes: &[u8], signature: &Signature) -> bool;
}

/// Ed25519-over-SHA-256 verification.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, address: &str, canonical_bytes: &[u8], signature: &Signature) -> bool {
        let Ok(public_key) = WalletPublicKey::from_hex(address) else {
            return false;
        };
        public_key.verify(&sha256_array(canonical_bytes), signature)
    }
}

/// Verify `signature` over `data` for the wallet at `address`.
///
/// Shorthand for [`Ed25519Verifier`] with the value's canonical encoding.
pub fn verify_signature<T: Signable + ?Sized>(
    address: &str,
    data: &T,
    signature: &Signature,
) -> bool {
    Ed25519Verifier.verify(address, &data.signable_bytes(), signature)
}
