//! Criterion benchmarks for the checkpoint hot paths.
//!
//! Covers: block-hash checks, progress estimation, and checkpoint location
//! against a block index the size of a synced mainnet node's header map.

use std::collections::HashMap;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tollgate_checkpoints::{params, CheckpointGuard, ProgressEstimator};
use tollgate_core::types::{BlockSummary, Hash256};

fn bench_check_block(c: &mut Criterion) {
    let guard = CheckpointGuard::new(Arc::new(params::mainnet()));
    let pinned = Hash256(params::MAINNET_CHECKPOINTS[5].1);
    let pinned_height = params::MAINNET_CHECKPOINTS[5].0;

    c.bench_function("check_block_pinned", |b| {
        b.iter(|| guard.is_block_allowed(black_box(pinned_height), black_box(&pinned)))
    });
    c.bench_function("check_block_unpinned", |b| {
        b.iter(|| guard.is_block_allowed(black_box(12_345), black_box(&Hash256::ZERO)))
    });
}

fn bench_progress(c: &mut Criterion) {
    let estimator = ProgressEstimator::with_clock(Arc::new(params::mainnet()), || 1_700_000_000);
    let before = BlockSummary { height: 200_000, chain_tx_count: 400_000, timestamp: 1_450_000_000 };
    let after = BlockSummary { height: 1_200_000, chain_tx_count: 1_300_000, timestamp: 1_600_000_000 };

    c.bench_function("estimate_progress_before_checkpoint", |b| {
        b.iter(|| estimator.estimate_progress(black_box(Some(&before)), true))
    });
    c.bench_function("estimate_progress_after_checkpoint", |b| {
        b.iter(|| estimator.estimate_progress(black_box(Some(&after)), true))
    });
}

fn bench_locator(c: &mut Criterion) {
    let guard = CheckpointGuard::new(Arc::new(params::mainnet()));
    let mut index: HashMap<Hash256, u64> = (0u64..100_000)
        .map(|i| {
            let mut bytes = [0xEEu8; 32];
            bytes[..8].copy_from_slice(&i.to_le_bytes());
            (Hash256(bytes), i)
        })
        .collect();
    // Only genesis is present, so the scan walks every pin.
    index.insert(Hash256(params::MAINNET_CHECKPOINTS[0].1), 0);

    c.bench_function("last_checkpoint_worst_case", |b| {
        b.iter(|| guard.last_checkpoint(black_box(&index)))
    });
}

criterion_group!(benches, bench_check_block, bench_progress, bench_locator);
criterion_main!(benches);
