//! # Hashing Utilities
//!
//! SHA-256 is the only digest Tally uses. Signatures are taken over the
//! SHA-256 digest of a value's canonical encoding (see [`signing_digest`]),
//! so the signed payload is always 32 bytes no matter how large the output
//! map grows.

use sha2::{Digest, Sha256};

use super::canonical::Signable;
use crate::config::HASH_OUTPUT_LENGTH;

/// SHA-256 of `data` as a heap-allocated vector.
pub fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// SHA-256 of `data` as a fixed-size array.
pub fn sha256_array(data: &[u8]) -> [u8; HASH_OUTPUT_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; HASH_OUTPUT_LENGTH];
    output.copy_from_slice(&result);
    output
}

/// The 32-byte payload that actually gets signed for `data`.
///
/// Signing and verification both go through here, which is what keeps them
/// in agreement.
pub fn signing_digest<T: Signable + ?Sized>(data: &T) -> [u8; HASH_OUTPUT_LENGTH] {
    sha256_array(&data.signable_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        // SHA-256("abc"), FIPS 180-2 appendix B.1.
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn array_and_vec_agree() {
        let data = b"tally";
        assert_eq!(sha256(data), sha256_array(data).to_vec());
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(signing_digest("same data"), signing_digest("same data"));
        assert_ne!(signing_digest("data one"), signing_digest("data two"));
    }

    #[test]
    fn str_and_bytes_digest_identically() {
        assert_eq!(signing_digest("abc"), signing_digest(&b"abc"[..]));
    }
}
