//! Transaction validation.
//!
//! Two rules, checked cheapest first:
//!
//! 1. **Conservation**: the outputs sum to exactly `input.amount`.
//! 2. **Authenticity**: `input.signature` verifies over the canonical
//!    encoding of the output map under `input.address`.
//!
//! [`verify_transaction`] returns the first broken rule as a
//! [`TransactionError`]. [`valid_transaction_with`] is the boolean boundary
//! used by pools and network layers: it reports the failure to a
//! [`DiagnosticSink`] and answers `false` instead of raising.

use thiserror::Error;
use tracing::trace;

use super::builder::Transaction;
use crate::crypto::canonical::Signable;
use crate::crypto::signatures::{Ed25519Verifier, SignatureVerifier};
use crate::diagnostics::{DiagnosticSink, TracingSink};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Everything that can go wrong building, updating or validating a
/// transaction.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The outputs do not add up to the amount the sender committed.
    #[error("invalid transaction from {address}: outputs total {total}, input declares {declared}")]
    ConservationViolation {
        address: String,
        total: u128,
        declared: u64,
    },

    /// The signature does not verify for the claimed sender and outputs.
    #[error("invalid signature from {address}")]
    InvalidSignature { address: String },

    /// The amount exceeds what the sender can spend.
    #[error("amount exceeds balance: required {required}, available {available}")]
    InsufficientBalance { required: u64, available: u64 },

    /// An update was attempted by a wallet that did not create the transaction.
    #[error("sender {actual} did not originate this transaction (originator {expected})")]
    SenderMismatch { expected: String, actual: String },

    /// An update was attempted but the sender has no output to draw from.
    #[error("sender {address} has no output in this transaction")]
    SenderNotInOutputs { address: String },

    /// Sender and recipient are the same wallet.
    #[error("sender and recipient must differ: both are {address}")]
    SelfTransfer { address: String },

    /// Payments must move a positive amount.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// Adding to a recipient's output overflowed `u64`.
    #[error("output for {recipient} would overflow")]
    AmountOverflow { recipient: String },
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Check both transaction invariants.
///
/// # Errors
///
/// [`TransactionError::ConservationViolation`] or
/// [`TransactionError::InvalidSignature`], whichever rule fails first.
pub fn verify_transaction(
    tx: &Transaction,
    verifier: &dyn SignatureVerifier,
) -> Result<(), TransactionError> {
    let address = &tx.input.address;

    // 1. Conservation. Pure arithmetic, so it goes first.
    let total = tx.output_map.total();
    if total != u128::from(tx.input.amount) {
        return Err(TransactionError::ConservationViolation {
            address: address.clone(),
            total,
            declared: tx.input.amount,
        });
    }

    // 2. Signature over the current outputs.
    let canonical = tx.output_map.signable_bytes();
    if !verifier.verify(address, &canonical, &tx.input.signature) {
        return Err(TransactionError::InvalidSignature {
            address: address.clone(),
        });
    }

    trace!(tx_id = %tx.id, "transaction verified");
    Ok(())
}

/// `true` if `tx` passes [`verify_transaction`]; otherwise reports the
/// reason to `sink` and returns `false`.
pub fn valid_transaction_with(
    tx: &Transaction,
    verifier: &dyn SignatureVerifier,
    sink: &dyn DiagnosticSink,
) -> bool {
    match verify_transaction(tx, verifier) {
        Ok(()) => true,
        Err(e) => {
            sink.report(&e.to_string());
            false
        }
    }
}

/// [`valid_transaction_with`] using Ed25519 and the tracing sink.
pub fn valid_transaction(tx: &Transaction) -> bool {
    valid_transaction_with(tx, &Ed25519Verifier, &TracingSink)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
