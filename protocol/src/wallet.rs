//! # Wallet
//!
//! A [`Wallet`] is an identity (its public key), a secret signing key and a
//! balance. It has exactly one job in the transaction core: produce
//! signatures, and supply the sender's address and balance when a
//! transaction is built or updated.
//!
//! ## Balance
//!
//! The balance is read, never written, by this crate. Debits and credits
//! belong to whatever ledger sits on top; a wallet here is a snapshot of
//! "what this sender can spend right now".
//!
//! ## Signing
//!
//! [`Wallet::sign`] canonically encodes the data, hashes it with SHA-256 and
//! signs the digest. Because the encoding is canonical and Ed25519 is
//! deterministic, signing equal data twice yields the same signature.

use std::fmt;

use tracing::debug;

use crate::config::STARTING_BALANCE;
use crate::crypto::canonical::Signable;
use crate::crypto::hash::signing_digest;
use crate::crypto::keys::{Signature, WalletKeypair};
use crate::transaction::{Transaction, TransactionError};

/// A sender identity with a spendable balance.
#[derive(Clone)]
pub struct Wallet {
    keypair: WalletKeypair,

    /// Hex of the verifying key, cached so it can be borrowed as `&str`.
    public_key: String,

    balance: u64,
}

impl Wallet {
    /// A fresh wallet with a random keypair and [`STARTING_BALANCE`].
    pub fn new() -> Self {
        Self::with_balance(STARTING_BALANCE)
    }

    /// A fresh wallet with a random keypair and the given balance.
    pub fn with_balance(balance: u64) -> Self {
        Self::from_keypair(WalletKeypair::generate(), balance)
    }

    /// Wrap an existing keypair, e.g. one restored from a seed.
    pub fn from_keypair(keypair: WalletKeypair, balance: u64) -> Self {
        let public_key = keypair.public_key().to_hex();
        debug!(address = %public_key, balance, "wallet loaded");
        Self {
            keypair,
            public_key,
            balance,
        }
    }

    /// The wallet address: lowercase hex of the Ed25519 verifying key.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Sign the canonical encoding of `data`.
    pub fn sign<T: Signable + ?Sized>(&self, data: &T) -> Signature {
        self.keypair.sign(&signing_digest(data))
    }

    /// Build a signed transaction paying `amount` to `recipient`.
    ///
    /// # Errors
    ///
    /// See [`Transaction::new`].
    pub fn create_transaction(
        &self,
        recipient: &str,
        amount: u64,
    ) -> Result<Transaction, TransactionError> {
        Transaction::new(self, recipient, amount)
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("public_key", &self.public_key)
            .field("balance", &self.balance)
            .finish()
    }
}
