//! Transaction construction and update.
//!
//! A [`Transaction`] is born fully formed: [`Transaction::new`] builds the
//! output map, signs it with the sender's wallet and returns a value that
//! already satisfies conservation and authenticity. The only way to change
//! it afterwards is [`Transaction::update`], which returns a *new* value with
//! the same id, an extra (or enlarged) output and a fresh signature.
//!
//! Amounts are `u64`. A sender can never commit more than it holds, so both
//! operations reject overspends up front instead of producing a negative
//! remainder.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::output_map::OutputMap;
use super::signing::sign_outputs;
use super::verification::TransactionError;
use crate::crypto::keys::Signature;
use crate::wallet::Wallet;

// ---------------------------------------------------------------------------
// TransactionInput
// ---------------------------------------------------------------------------

/// The sender-attributable half of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Unix milliseconds of the most recent signing.
    pub timestamp: u64,

    /// Sender's balance when the transaction was created. Equal to the sum
    /// of the outputs for any valid transaction.
    pub amount: u64,

    /// Sender's wallet address (hex public key).
    pub address: String,

    /// Signature over the canonical encoding of the output map.
    pub signature: Signature,
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A signed value transfer from one wallet to one or more recipients.
///
/// Fields are public so that transport and storage layers can read them and
/// so that tests can tamper with them. Anything built outside
/// [`Transaction::new`]/[`Transaction::update`] should be run through
/// [`super::verification::verify_transaction`] before it is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Random v4 UUID, fixed for the transaction's lifetime.
    pub id: Uuid,

    /// Recipient -> amount, including the sender's own change output.
    pub output_map: OutputMap,

    pub input: TransactionInput,
}

impl Transaction {
    /// Build and sign a transaction paying `amount` from `sender` to
    /// `recipient`. The remainder of the sender's balance is output back to
    /// the sender.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::InsufficientBalance`] if `amount` exceeds the
    ///   sender's balance.
    /// - [`TransactionError::SelfTransfer`] if `recipient` is the sender.
    /// - [`TransactionError::ZeroAmount`] if `amount` is zero.
    pub fn new(sender: &Wallet, recipient: &str, amount: u64) -> Result<Self, TransactionError> {
        if recipient == sender.public_key() {
            return Err(TransactionError::SelfTransfer {
                address: recipient.to_string(),
            });
        }
        if amount == 0 {
            return Err(TransactionError::ZeroAmount);
        }

        let balance = sender.balance();
        let change = balance
            .checked_sub(amount)
            .ok_or(TransactionError::InsufficientBalance {
                required: amount,
                available: balance,
            })?;

        let mut output_map = OutputMap::new();
        output_map.set(recipient, amount);
        output_map.set(sender.public_key(), change);

        let input = sign_outputs(sender, balance, &output_map);
        let id = Uuid::new_v4();

        debug!(
            tx_id = %id,
            sender = %sender.public_key(),
            recipient,
            amount,
            "transaction created"
        );

        Ok(Self {
            id,
            output_map,
            input,
        })
    }

    /// Pay another `amount` to `recipient` out of the sender's change output
    /// and re-sign.
    ///
    /// Returns the updated transaction; `self` is left untouched. The id and
    /// `input.amount` carry over, the timestamp and signature are fresh.
    /// Paying a recipient that is already present adds to its output.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::SenderMismatch`] if `sender` did not originate
    ///   this transaction.
    /// - [`TransactionError::SenderNotInOutputs`] if the sender has no change
    ///   output to draw from.
    /// - [`TransactionError::SelfTransfer`] if `recipient` is the sender.
    /// - [`TransactionError::ZeroAmount`] if `amount` is zero.
    /// - [`TransactionError::InsufficientBalance`] if `amount` exceeds the
    ///   sender's current change output.
    /// - [`TransactionError::AmountOverflow`] if the recipient's output would
    ///   overflow (only reachable on a tampered transaction).
    pub fn update(
        &self,
        sender: &Wallet,
        recipient: &str,
        amount: u64,
    ) -> Result<Self, TransactionError> {
        let address = sender.public_key();

        if address != self.input.address {
            return Err(TransactionError::SenderMismatch {
                expected: self.input.address.clone(),
                actual: address.to_string(),
            });
        }

        let sender_output = self
            .output_map
            .get(address)
            .ok_or_else(|| TransactionError::SenderNotInOutputs {
                address: address.to_string(),
            })?;

        if recipient == address {
            return Err(TransactionError::SelfTransfer {
                address: recipient.to_string(),
            });
        }

        // A zero payment would leave the outputs, and so the signature,
        // unchanged.
        if amount == 0 {
            return Err(TransactionError::ZeroAmount);
        }

        let remaining =
            sender_output
                .checked_sub(amount)
                .ok_or(TransactionError::InsufficientBalance {
                    required: amount,
                    available: sender_output,
                })?;

        let recipient_output = self
            .output_map
            .get(recipient)
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or_else(|| TransactionError::AmountOverflow {
                recipient: recipient.to_string(),
            })?;

        let mut output_map = self.output_map.clone();
        output_map.set(recipient, recipient_output);
        output_map.set(address, remaining);

        let input = sign_outputs(sender, self.input.amount, &output_map);

        debug!(
            tx_id = %self.id,
            recipient,
            amount,
            remaining,
            "transaction updated"
        );

        Ok(Self {
            id: self.id,
            output_map,
            input,
        })
    }

    /// Sum of all outputs (see [`OutputMap::total`]).
    pub fn output_total(&self) -> u128 {
        self.output_map.total()
    }

    /// Sender's address, shorthand for `input.address`.
    pub fn sender(&self) -> &str {
        &self.input.address
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
