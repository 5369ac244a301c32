//! Terminal walkthrough of the Tally transaction lifecycle.
//!
//! Creates wallets, pays one recipient, folds a second payment into the same
//! transaction, validates it, hands it off as JSON, and finally shows what a
//! validator reports when a transaction has been tampered with.
//!
//! Run with:
//!   cargo run --example demo
//!
//! Set `LOG_FORMAT=json` for JSON logs and `RUST_LOG=tally_protocol=debug`
//! to see the library's own events.

use std::time::Instant;

use anyhow::{ensure, Context, Result};

use tally_protocol::config::{DIGEST_ALGORITHM, PROTOCOL_VERSION, SIGNING_ALGORITHM};
use tally_protocol::crypto::signatures::Ed25519Verifier;
use tally_protocol::logging::{init_logging, LogFormat};
use tally_protocol::{
    valid_transaction, valid_transaction_with, CapturingSink, Transaction, TransactionPool, Wallet,
};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn banner() {
    println!();
    println!("{BOLD}{WHITE}  TALLY PROTOCOL  --  Transaction Lifecycle Demo{RESET}");
    println!(
        "{DIM}  Version {PROTOCOL_VERSION}  |  {SIGNING_ALGORITHM} over {DIGEST_ALGORITHM}{RESET}"
    );
}

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]========================================{RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn failure(text: &str) {
    println!("{RED}  [REJECTED] {text}{RESET}");
}

fn short(addr: &str) -> String {
    if addr.len() <= 16 {
        return addr.to_string();
    }
    format!("{}...{}", &addr[..8], &addr[addr.len() - 6..])
}

fn print_outputs(tx: &Transaction) {
    for (recipient, amount) in tx.output_map.iter() {
        println!("    {DIM}{:<20}{RESET} {WHITE}{amount:>8}{RESET}", short(recipient));
    }
    println!(
        "    {DIM}{:<20}{RESET} {BOLD}{:>8}{RESET}",
        "total",
        tx.output_total()
    );
}

// ---------------------------------------------------------------------------
// Walkthrough
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let format = LogFormat::from_str_lossy(&std::env::var("LOG_FORMAT").unwrap_or_default());
    init_logging("info", format).context("installing log subscriber")?;

    banner();

    section(1, "Create wallets");
    let alice = Wallet::new();
    let bob = Wallet::new();
    let carol = Wallet::new();
    for (name, w) in [("alice", &alice), ("bob", &bob), ("carol", &carol)] {
        println!("    {BOLD}{name:<6}{RESET} {} balance {}", short(w.public_key()), w.balance());
    }

    section(2, "Alice pays Bob 50");
    let started = Instant::now();
    let tx = alice.create_transaction(bob.public_key(), 50)?;
    print_outputs(&tx);
    println!("    {DIM}signed in {:.2} ms{RESET}", started.elapsed().as_secs_f64() * 1000.0);

    section(3, "Alice adds a payment of 50 to Carol");
    let tx = tx.update(&alice, carol.public_key(), 50)?;
    print_outputs(&tx);
    ensure!(valid_transaction(&tx), "updated transaction failed validation");
    success(&format!("transaction {} is valid", tx.id));

    section(4, "Hand off as JSON");
    let json = serde_json::to_string_pretty(&tx)?;
    println!("{DIM}{json}{RESET}");
    let received: Transaction = serde_json::from_str(&json)?;
    ensure!(valid_transaction(&received), "transaction did not survive transport");
    success("receiver validated the transaction");

    section(5, "Tampering is caught");
    let mut forged = received.clone();
    forged.output_map.set(alice.public_key(), 99_999);
    let sink = CapturingSink::new();
    if !valid_transaction_with(&forged, &Ed25519Verifier, &sink) {
        for message in sink.messages() {
            failure(&message);
        }
    }

    section(6, "Pool folds payments per sender");
    let pool = TransactionPool::default();
    pool.transact(&bob, alice.public_key(), 10)?;
    pool.transact(&bob, carol.public_key(), 15)?;
    pool.transact(&carol, bob.public_key(), 5)?;
    let valid = pool.valid_transactions(&Ed25519Verifier, &sink);
    success(&format!(
        "{} pending transactions, {} valid",
        pool.len(),
        valid.len()
    ));

    println!();
    Ok(())
}
