// Signing & verification benchmarks for the Tally protocol.
//
// Covers keypair generation, wallet signing, transaction construction and
// update, and validation of transactions with growing output maps.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tally_protocol::crypto::canonical::Signable;
use tally_protocol::crypto::keys::WalletKeypair;
use tally_protocol::{valid_transaction, Transaction, Wallet};

fn bench_keypair_generation(c: &mut Criterion) {
    c.bench_function("ed25519/keypair_generate", |b| {
        b.iter(WalletKeypair::generate);
    });
}

fn bench_wallet_sign(c: &mut Criterion) {
    let wallet = Wallet::new();
    let message = "transfer 50 from alice to bob";

    c.bench_function("wallet/sign", |b| {
        b.iter(|| wallet.sign(message));
    });
}

fn bench_create_transaction(c: &mut Criterion) {
    let wallet = Wallet::new();

    c.bench_function("transaction/create", |b| {
        b.iter(|| wallet.create_transaction("recipient", 50));
    });
}

fn bench_update_transaction(c: &mut Criterion) {
    let wallet = Wallet::new();
    let tx = wallet.create_transaction("recipient", 50).unwrap();

    c.bench_function("transaction/update", |b| {
        b.iter(|| tx.update(&wallet, "next-recipient", 10));
    });
}

/// A transaction paying `outputs - 1` recipients plus the sender's change.
fn wide_transaction(wallet: &Wallet, outputs: usize) -> Transaction {
    let mut tx = wallet.create_transaction("recipient-0", 1).unwrap();
    for i in 1..outputs.saturating_sub(1) {
        tx = tx.update(wallet, &format!("recipient-{}", i), 1).unwrap();
    }
    tx
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("transaction/validate");
    let wallet = Wallet::with_balance(1_000_000);

    for outputs in [2usize, 16, 128] {
        let tx = wide_transaction(&wallet, outputs);
        group.throughput(Throughput::Bytes(tx.output_map.signable_bytes().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(outputs), &tx, |b, tx| {
            b.iter(|| valid_transaction(tx));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_keypair_generation,
    bench_wallet_sign,
    bench_create_transaction,
    bench_update_transaction,
    bench_validate,
);
criterion_main!(benches);
