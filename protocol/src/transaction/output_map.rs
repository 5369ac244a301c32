//! The recipient -> amount table of a transaction.
//!
//! Backed by a `BTreeMap`, so iteration is always in lexicographic order of
//! the recipient identity. That ordering is what the canonical encoding
//! walks, which is why two maps holding the same entries sign identically
//! regardless of the order the entries went in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::crypto::canonical::{put_length_prefixed, Signable};

/// Mapping from recipient identity to the amount it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputMap(BTreeMap<String, u64>);

impl OutputMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, recipient: &str) -> Option<u64> {
        self.0.get(recipient).copied()
    }

    pub fn contains(&self, recipient: &str) -> bool {
        self.0.contains_key(recipient)
    }

    /// Sets `recipient`'s output, returning the previous amount if any.
    ///
    /// This is a raw write with no conservation bookkeeping. Transactions
    /// only change their outputs through [`super::Transaction::update`].
    pub fn set(&mut self, recipient: impl Into<String>, amount: u64) -> Option<u64> {
        self.0.insert(recipient.into(), amount)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum of all outputs.
    ///
    /// Widened to `u128` so a tampered map full of `u64::MAX` entries still
    /// sums without overflow.
    pub fn total(&self) -> u128 {
        self.0.values().map(|v| u128::from(*v)).sum()
    }
}

impl Signable for OutputMap {
    /// `u32` entry count, then per entry in key order: length-prefixed
    /// recipient bytes and the amount as `u64`, all little-endian.
    fn signable_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.0.len() * 80);
        buf.extend_from_slice(&(self.0.len() as u32).to_le_bytes());
        for (recipient, amount) in &self.0 {
            put_length_prefixed(&mut buf, recipient.as_bytes());
            buf.extend_from_slice(&amount.to_le_bytes());
        }
        buf
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for OutputMap {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
