//! Pending transaction pool.
//!
//! Holds transactions that have been created or received but not yet
//! settled. Each sender has at most one pending transaction at a time:
//! further payments from the same wallet are folded into it through
//! [`Transaction::update`] rather than creating a second one.
//!
//! ## Design
//!
//! - A single `parking_lot::RwLock<HashMap>` keyed by transaction id. Reads
//!   (lookups, validation sweeps) share the lock.
//! - [`TransactionPool::transact`] does its lookup, update-or-create and
//!   store under one write guard, so two threads paying from the same
//!   wallet can't both build on the same stale transaction.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use super::builder::Transaction;
use super::verification::{valid_transaction_with, TransactionError};
use crate::config::DEFAULT_POOL_SIZE;
use crate::crypto::signatures::SignatureVerifier;
use crate::diagnostics::DiagnosticSink;
use crate::wallet::Wallet;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunable parameters for the pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of pending transactions. Replacing an existing id never
    /// counts against this.
    pub max_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_POOL_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// PoolError
// ---------------------------------------------------------------------------

/// Errors returned by pool operations.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The pool is at capacity and the transaction has a new id.
    #[error("transaction pool is full ({size} transactions)")]
    PoolFull { size: usize },

    /// The sender already has a different transaction pending.
    #[error("sender {address} already has pending transaction {existing}")]
    SenderHasPending { address: String, existing: Uuid },

    /// Building or updating the sender's transaction failed.
    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

// ---------------------------------------------------------------------------
// TransactionPool
// ---------------------------------------------------------------------------

/// A thread-safe map of pending transactions.
pub struct TransactionPool {
    transactions: RwLock<HashMap<Uuid, Transaction>>,
    config: PoolConfig,
}

impl fmt::Debug for TransactionPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionPool")
            .field("size", &self.transactions.read().len())
            .field("config", &self.config)
            .finish()
    }
}

impl TransactionPool {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            transactions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Insert `tx`, replacing any pending transaction with the same id.
    ///
    /// A sender has at most one pending transaction, so a new id from an
    /// address that already has one is rejected with
    /// [`PoolError::SenderHasPending`].
    ///
    /// The transaction is stored as given. Callers accepting transactions
    /// from outside should check them with [`TransactionPool::valid_transactions`]
    /// or [`super::verify_transaction`].
    pub fn set_transaction(&self, tx: Transaction) -> Result<(), PoolError> {
        let mut guard = self.transactions.write();
        Self::store(&mut guard, &self.config, tx)
    }

    /// Pay `amount` from `wallet` to `recipient`.
    ///
    /// If `wallet` already has a pending transaction it is updated and
    /// re-signed; otherwise a new one is created. Either way the result is
    /// stored and returned.
    ///
    /// # Errors
    ///
    /// Any [`TransactionError`] from [`Transaction::new`] or
    /// [`Transaction::update`], or [`PoolError::PoolFull`] when a new
    /// transaction does not fit.
    pub fn transact(
        &self,
        wallet: &Wallet,
        recipient: &str,
        amount: u64,
    ) -> Result<Transaction, PoolError> {
        let mut guard = self.transactions.write();

        let existing = guard
            .values()
            .find(|tx| tx.input.address == wallet.public_key());

        let tx = match existing {
            Some(pending) => pending.update(wallet, recipient, amount)?,
            None => Transaction::new(wallet, recipient, amount)?,
        };

        Self::store(&mut guard, &self.config, tx.clone())?;
        Ok(tx)
    }

    /// The pending transaction sent by `address`, if any.
    pub fn existing_transaction(&self, address: &str) -> Option<Transaction> {
        self.transactions
            .read()
            .values()
            .find(|tx| tx.input.address == address)
            .cloned()
    }

    pub fn get(&self, id: &Uuid) -> Option<Transaction> {
        self.transactions.read().get(id).cloned()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.transactions.read().contains_key(id)
    }

    /// Pending transactions that pass validation.
    ///
    /// Invalid ones are reported to `sink` and left out of the result. They
    /// stay in the pool.
    pub fn valid_transactions(
        &self,
        verifier: &dyn SignatureVerifier,
        sink: &dyn DiagnosticSink,
    ) -> Vec<Transaction> {
        let guard = self.transactions.read();
        let valid: Vec<Transaction> = guard
            .values()
            .filter(|tx| valid_transaction_with(tx, verifier, sink))
            .cloned()
            .collect();

        if valid.len() < guard.len() {
            warn!(
                rejected = guard.len() - valid.len(),
                "invalid transactions in pool"
            );
        }
        valid
    }

    /// Remove the given ids. Missing ids are ignored.
    pub fn remove_batch(&self, ids: &[Uuid]) {
        let mut guard = self.transactions.write();
        for id in ids {
            guard.remove(id);
        }
        debug!(count = ids.len(), remaining = guard.len(), "pool batch removed");
    }

    pub fn clear(&self) {
        self.transactions.write().clear();
    }

    pub fn len(&self) -> usize {
        self.transactions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.read().is_empty()
    }

    fn store(
        map: &mut HashMap<Uuid, Transaction>,
        config: &PoolConfig,
        tx: Transaction,
    ) -> Result<(), PoolError> {
        if let Some(pending) = map
            .values()
            .find(|pending| pending.id != tx.id && pending.input.address == tx.input.address)
        {
            return Err(PoolError::SenderHasPending {
                address: tx.input.address.clone(),
                existing: pending.id,
            });
        }
        if !map.contains_key(&tx.id) && map.len() >= config.max_size {
            return Err(PoolError::PoolFull {
                size: config.max_size,
            });
        }
        debug!(tx_id = %tx.id, sender = %tx.input.address, "pool transaction stored");
        map.insert(tx.id, tx);
        Ok(())
    }
}

impl Default for TransactionPool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
