//! End-to-end integration tests for the Tally protocol.
//!
//! These go through the public API only: wallets pay each other, senders
//! update pending transactions, validators check what they receive, and
//! transactions cross a JSON boundary the way they would between processes.

use std::sync::Arc;
use std::thread;

use tally_protocol::crypto::keys::WalletKeypair;
use tally_protocol::crypto::signatures::Ed25519Verifier;
use tally_protocol::{
    valid_transaction, valid_transaction_with, verify_transaction, CapturingSink, PoolConfig,
    Transaction, TransactionError, TransactionPool, Wallet,
};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// A wallet with a fixed identity, so failures are reproducible.
fn seeded_wallet(seed: u8, balance: u64) -> Wallet {
    Wallet::from_keypair(WalletKeypair::from_seed(&[seed; 32]), balance)
}

fn assert_conserves(tx: &Transaction) {
    assert_eq!(tx.output_total(), u128::from(tx.input.amount));
}

// ---------------------------------------------------------------------------
// Create & update
// ---------------------------------------------------------------------------

#[test]
fn pay_then_update_splits_balance() {
    let sender = seeded_wallet(1, 1_000);
    let r1 = seeded_wallet(2, 0);
    let r2 = seeded_wallet(3, 0);

    let tx = sender.create_transaction(r1.public_key(), 50).unwrap();
    let updated = tx.update(&sender, r2.public_key(), 50).unwrap();

    assert_eq!(updated.output_map.len(), 3);
    assert_eq!(updated.output_map.get(r1.public_key()), Some(50));
    assert_eq!(updated.output_map.get(r2.public_key()), Some(50));
    assert_eq!(updated.output_map.get(sender.public_key()), Some(900));
    assert_eq!(updated.input.amount, 1_000);
    assert_eq!(updated.id, tx.id);
    assert!(valid_transaction(&updated));

    // The original value is untouched and still valid on its own.
    assert_eq!(tx.output_map.get(sender.public_key()), Some(950));
    assert!(valid_transaction(&tx));
}

#[test]
fn long_update_sequence_conserves_value() {
    let sender = Wallet::new();
    let mut tx = sender.create_transaction("recipient-0", 10).unwrap();

    for i in 1..=20u64 {
        tx = tx.update(&sender, &format!("recipient-{}", i), i).unwrap();
        assert_conserves(&tx);
        assert!(valid_transaction(&tx));
    }

    // 10 + (1 + 2 + ... + 20) spent
    assert_eq!(tx.output_map.get(sender.public_key()), Some(1_000 - 10 - 210));
}

#[test]
fn repeated_recipient_accumulates() {
    let sender = Wallet::new();
    let tx = sender.create_transaction("bob", 30).unwrap();
    let tx = tx.update(&sender, "bob", 20).unwrap();

    assert_eq!(tx.output_map.len(), 2);
    assert_eq!(tx.output_map.get("bob"), Some(50));
    assert_eq!(tx.output_map.get(sender.public_key()), Some(950));
    assert!(valid_transaction(&tx));
}

#[test]
fn update_resigns() {
    let sender = Wallet::new();
    let tx = sender.create_transaction("bob", 30).unwrap();
    let updated = tx.update(&sender, "carol", 20).unwrap();

    assert_ne!(tx.input.signature, updated.input.signature);
    assert!(updated.input.timestamp >= tx.input.timestamp);
}

#[test]
fn spending_everything_leaves_zero_change() {
    let sender = Wallet::with_balance(100);
    let tx = sender.create_transaction("bob", 60).unwrap();
    let tx = tx.update(&sender, "carol", 40).unwrap();

    assert_eq!(tx.output_map.get(sender.public_key()), Some(0));
    assert!(valid_transaction(&tx));

    match tx.update(&sender, "dave", 1) {
        Err(TransactionError::InsufficientBalance {
            required: 1,
            available: 0,
        }) => {}
        other => panic!("expected InsufficientBalance, got {:?}", other),
    }
}

#[test]
fn stranger_cannot_update() {
    let sender = Wallet::new();
    let stranger = Wallet::new();
    let tx = sender.create_transaction("bob", 30).unwrap();

    assert!(matches!(
        tx.update(&stranger, "mallory", 30),
        Err(TransactionError::SenderMismatch { .. })
    ));
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn tampered_outputs_are_reported() {
    let sender = Wallet::new();
    let mut tx = sender.create_transaction("bob", 30).unwrap();
    tx.output_map.set(sender.public_key(), 99_999);

    let sink = CapturingSink::new();
    assert!(!valid_transaction_with(&tx, &Ed25519Verifier, &sink));
    assert_eq!(sink.len(), 1);
    assert!(sink.messages()[0].contains("invalid transaction"));
}

#[test]
fn forged_signature_is_reported() {
    let sender = Wallet::new();
    let mut tx = sender.create_transaction("bob", 30).unwrap();
    tx.input.signature = Wallet::new().sign("invalid data");

    let sink = CapturingSink::new();
    assert!(!valid_transaction_with(&tx, &Ed25519Verifier, &sink));
    assert_eq!(sink.len(), 1);
    assert!(sink.messages()[0].contains("invalid signature"));
}

#[test]
fn redirecting_a_payment_breaks_the_signature() {
    let sender = Wallet::new();
    let mut tx = sender.create_transaction("bob", 30).unwrap();

    // Same total, different payee.
    let amount = tx.output_map.get("bob").unwrap();
    tx.output_map.set("bob", 0);
    tx.output_map.set("mallory", amount);

    assert!(matches!(
        verify_transaction(&tx, &Ed25519Verifier),
        Err(TransactionError::InvalidSignature { .. })
    ));
}

// ---------------------------------------------------------------------------
// JSON hand-off
// ---------------------------------------------------------------------------

#[test]
fn transaction_survives_json_transport() {
    let sender = Wallet::new();
    let tx = sender
        .create_transaction("bob", 30)
        .unwrap()
        .update(&sender, "carol", 20)
        .unwrap();

    let json = serde_json::to_string(&tx).unwrap();
    let received: Transaction = serde_json::from_str(&json).unwrap();

    assert_eq!(received, tx);
    assert!(valid_transaction(&received));
}

#[test]
fn tampering_in_transit_is_detected() {
    let sender = Wallet::new();
    let tx = sender.create_transaction("bob", 30).unwrap();

    let mut value = serde_json::to_value(&tx).unwrap();
    value["output_map"]["bob"] = serde_json::json!(300);
    value["input"]["amount"] = serde_json::json!(1_270);
    let received: Transaction = serde_json::from_value(value).unwrap();

    assert_conserves(&received);
    assert!(!valid_transaction(&received));
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

#[test]
fn pool_folds_payments_per_sender() {
    let pool = TransactionPool::new(PoolConfig::default());
    let alice = Wallet::new();
    let bob = Wallet::new();

    pool.transact(&alice, bob.public_key(), 50).unwrap();
    pool.transact(&alice, "carol", 50).unwrap();
    pool.transact(&bob, alice.public_key(), 10).unwrap();

    assert_eq!(pool.len(), 2);

    let from_alice = pool.existing_transaction(alice.public_key()).unwrap();
    assert_eq!(from_alice.output_map.get(alice.public_key()), Some(900));

    let sink = CapturingSink::new();
    assert_eq!(pool.valid_transactions(&Ed25519Verifier, &sink).len(), 2);
    assert!(sink.is_empty());
}

#[test]
fn pool_serialises_concurrent_senders() {
    let pool = Arc::new(TransactionPool::default());
    let wallets: Vec<Arc<Wallet>> = (0..4).map(|_| Arc::new(Wallet::new())).collect();

    let handles: Vec<_> = wallets
        .iter()
        .flat_map(|wallet| {
            (0..3).map(|i| {
                let pool = Arc::clone(&pool);
                let wallet = Arc::clone(wallet);
                thread::spawn(move || {
                    for j in 0..10 {
                        pool.transact(&wallet, &format!("payee-{}-{}", i, j), 5)
                            .unwrap();
                    }
                })
            })
        })
        .collect();

    for h in handles {
        h.join().expect("thread panicked");
    }

    assert_eq!(pool.len(), wallets.len());
    for wallet in &wallets {
        let tx = pool.existing_transaction(wallet.public_key()).unwrap();
        assert_eq!(tx.output_map.get(wallet.public_key()), Some(1_000 - 30 * 5));
        assert!(valid_transaction(&tx));
    }
}
