//! # Transaction Module
//!
//! Construction, update, signing and validation of Tally transactions. A
//! [`Transaction`] moves value from one sender to one or more recipients;
//! whatever the sender does not spend is output back to the sender.
//!
//! ## Architecture
//!
//! ```text
//! output_map.rs   : OutputMap, the recipient -> amount table and its canonical encoding
//! builder.rs      : Transaction and TransactionInput, construction and update
//! signing.rs      : Signing the output map into a TransactionInput
//! verification.rs : Conservation and signature checks, TransactionError
//! pool.rs         : Thread-safe pool of pending transactions
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Create**: [`Transaction::new`] (or [`crate::Wallet::create_transaction`]).
//! 2. **Update**: [`Transaction::update`] pays another recipient out of the
//!    sender's change and re-signs. The id never changes.
//! 3. **Validate**: anyone holding the transaction runs
//!    [`valid_transaction`] before trusting it.
//!
//! ## Invariants
//!
//! For every transaction produced by `new` or `update`:
//!
//! - the outputs sum to `input.amount`;
//! - `input.signature` verifies over the current output map under
//!   `input.address`.
//!
//! Amounts are `u64` in the smallest unit. No floating point anywhere.

pub mod builder;
pub mod output_map;
pub mod pool;
pub mod signing;
pub mod verification;

pub use builder::{Transaction, TransactionInput};
pub use output_map::OutputMap;
pub use pool::{PoolConfig, PoolError, TransactionPool};
pub use signing::sign_outputs;
pub use verification::{
    valid_transaction, valid_transaction_with, verify_transaction, TransactionError,
};
