//! Producing the signed `input` block of a transaction.
//!
//! Both construction and update end the same way: take the final output
//! map, have the sender's wallet sign it, and stamp the result with the
//! current time. Keeping that in one place means the two paths can't drift
//! apart on what gets signed.

use chrono::Utc;

use super::builder::TransactionInput;
use super::output_map::OutputMap;
use crate::wallet::Wallet;

/// Sign `output_map` with `sender` and wrap the signature in an input block.
///
/// `amount` is recorded verbatim: the sender's balance at construction, and
/// the unchanged original total on every later re-sign.
pub fn sign_outputs(sender: &Wallet, amount: u64, output_map: &OutputMap) -> TransactionInput {
    TransactionInput {
        timestamp: now_millis(),
        amount,
        address: sender.public_key().to_string(),
        signature: sender.sign(output_map),
    }
}

/// Wall-clock milliseconds since the Unix epoch. Pre-epoch clocks read as 0.
pub fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
