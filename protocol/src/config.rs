//! # Protocol Configuration & Constants
//!
//! Every magic number in Tally lives here. Tunables that callers may want to
//! override are plain structs with a `Default` impl next to the code that
//! uses them (see [`crate::transaction::pool::PoolConfig`]).

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Crate/protocol version string.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Wallet Parameters
// ---------------------------------------------------------------------------

/// Balance a freshly created wallet starts with, in the smallest unit.
pub const STARTING_BALANCE: u64 = 1_000;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Signature scheme used by wallets.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Digest applied to canonical bytes before signing.
pub const DIGEST_ALGORITHM: &str = "SHA-256";

/// Ed25519 secret key length in bytes.
pub const SIGNING_KEY_LENGTH: usize = 32;

/// Ed25519 public (verifying) key length in bytes.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// SHA-256 output length in bytes.
pub const HASH_OUTPUT_LENGTH: usize = 32;

/// Length of a wallet address: hex of the verifying key.
pub const ADDRESS_HEX_LENGTH: usize = VERIFYING_KEY_LENGTH * 2;

// ---------------------------------------------------------------------------
// Transaction Pool
// ---------------------------------------------------------------------------

/// Default capacity of a [`crate::transaction::pool::TransactionPool`].
pub const DEFAULT_POOL_SIZE: usize = 10_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_parameter_sizes() {
        assert_eq!(SIGNING_KEY_LENGTH, ed25519_dalek::SECRET_KEY_LENGTH);
        assert_eq!(VERIFYING_KEY_LENGTH, ed25519_dalek::PUBLIC_KEY_LENGTH);
        assert_eq!(SIGNATURE_LENGTH, ed25519_dalek::SIGNATURE_LENGTH);
        assert_eq!(HASH_OUTPUT_LENGTH, 32);
        assert_eq!(ADDRESS_HEX_LENGTH, 64);
    }

    #[test]
    fn version_matches_crate() {
        assert_eq!(PROTOCOL_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn algorithm_names() {
        assert_eq!(SIGNING_ALGORITHM, "Ed25519");
        assert_eq!(DIGEST_ALGORITHM, "SHA-256");
    }

    #[test]
    fn starting_balance_is_spendable() {
        assert!(STARTING_BALANCE > 0);
    }
}
