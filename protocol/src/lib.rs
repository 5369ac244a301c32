// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Tally Protocol: Core Library
//!
//! The signed-transaction core of Tally. A [`Wallet`] holds an identity and
//! a balance and signs things; a [`Transaction`] moves value out of a wallet
//! to one or more recipients and carries the sender's signature over exactly
//! what it pays.
//!
//! ## Architecture
//!
//! - **crypto**: Ed25519 keys, SHA-256 digests and the canonical encoding
//!   that signatures are computed over.
//! - **wallet**: identity, balance and signing.
//! - **transaction**: construction, update, validation and the pending pool.
//! - **diagnostics**: where validation failures get reported.
//! - **logging**: `tracing` subscriber setup for binaries and demos.
//! - **config**: protocol constants.
//!
//! ## Example
//!
//! ```
//! use tally_protocol::{valid_transaction, Wallet};
//!
//! let wallet = Wallet::new();
//! let tx = wallet.create_transaction("recipient-address", 50).unwrap();
//! let tx = tx.update(&wallet, "another-recipient", 25).unwrap();
//!
//! assert!(valid_transaction(&tx));
//! assert_eq!(tx.output_map.get(wallet.public_key()), Some(925));
//! ```

pub mod config;
pub mod crypto;
pub mod diagnostics;
pub mod logging;
pub mod transaction;
pub mod wallet;

pub use diagnostics::{CapturingSink, DiagnosticSink, TracingSink};
pub use transaction::{
    valid_transaction, valid_transaction_with, verify_transaction, OutputMap, PoolConfig,
    PoolError, Transaction, TransactionError, TransactionInput, TransactionPool,
};
pub use wallet::Wallet;
