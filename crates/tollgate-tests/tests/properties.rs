//! Property-based tests for the checkpoint guard.
//!
//! Each property runs 256 cases with proptest shrinking to produce minimal
//! failing examples.
//!
//! Properties covered:
//! - Unpinned heights accept any hash
//! - Pinned heights accept exactly the pinned hash
//! - A disabled guard accepts everything and locates nothing
//! - Progress stays in [0, 1] and never decreases as transactions accumulate
//! - The locator returns the highest pinned block present in the index

use std::collections::HashMap;
use std::sync::Arc;

use proptest::prelude::*;
use tollgate_checkpoints::{
    guess_verification_progress, CheckpointGuard, CheckpointStats, CheckpointTable, ProgressEstimator,
};
use tollgate_core::constants::SIGCHECK_VERIFICATION_FACTOR;
use tollgate_core::types::{BlockSummary, Hash256};
use tollgate_tests::helpers::{block, pin};

/// A table pinning each height in `heights` to [`pin`].
fn table_for(heights: &[u64], stats: CheckpointStats) -> CheckpointTable {
    CheckpointTable::from_static(
        &heights.iter().map(|&h| (h, pin(h).0)).collect::<Vec<_>>(),
        stats,
    )
}

fn heights_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::btree_set(0u64..1_000_000, 0..40).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn unpinned_heights_accept_any_hash(
        heights in heights_strategy(),
        height in 0u64..2_000_000,
        hash in any::<[u8; 32]>(),
    ) {
        prop_assume!(!heights.contains(&height));
        let guard = CheckpointGuard::new(Arc::new(table_for(&heights, CheckpointStats::ZERO)));
        prop_assert!(guard.is_block_allowed(height, &Hash256(hash)));
    }

    #[test]
    fn pinned_heights_accept_only_the_pin(
        heights in heights_strategy(),
        pick in any::<prop::sample::Index>(),
        other in any::<[u8; 32]>(),
    ) {
        prop_assume!(!heights.is_empty());
        let height = heights[pick.index(heights.len())];
        prop_assume!(Hash256(other) != pin(height));

        let guard = CheckpointGuard::new(Arc::new(table_for(&heights, CheckpointStats::ZERO)));
        prop_assert!(guard.is_block_allowed(height, &pin(height)));
        prop_assert!(!guard.is_block_allowed(height, &Hash256(other)));
    }

    #[test]
    fn disabled_guard_is_fully_permissive(
        heights in heights_strategy(),
        height in 0u64..2_000_000,
        hash in any::<[u8; 32]>(),
    ) {
        let guard = CheckpointGuard::new(Arc::new(table_for(&heights, CheckpointStats::ZERO)))
            .with_enabled(false);
        let index: HashMap<Hash256, u64> = heights.iter().map(|&h| (pin(h), h)).collect();

        prop_assert!(guard.is_block_allowed(height, &Hash256(hash)));
        prop_assert_eq!(guard.last_checkpoint(&index), None);
        prop_assert_eq!(guard.total_blocks_estimate(), 0);
    }

    #[test]
    fn locator_returns_highest_present(
        heights in heights_strategy(),
        present_mask in prop::collection::vec(any::<bool>(), 40),
    ) {
        let guard = CheckpointGuard::new(Arc::new(table_for(&heights, CheckpointStats::ZERO)));
        let present: Vec<u64> = heights
            .iter()
            .zip(&present_mask)
            .filter(|&(_, keep)| *keep)
            .map(|(h, _)| *h)
            .collect();
        let index: HashMap<Hash256, u64> = present.iter().map(|&h| (pin(h), h)).collect();

        prop_assert_eq!(guard.last_checkpoint(&index), present.iter().max().copied());
    }

    #[test]
    fn progress_in_unit_range_including_boundary(
        checkpoint_tx in 0u64..5_000_000,
        tx_per_day in 0.0f64..500_000.0,
        delta in -1_000i64..1_000,
        ts in 1_000_000_000u64..2_000_000_000,
        now in 1_000_000_000u64..2_000_000_000,
        use_sigchecks in any::<bool>(),
    ) {
        let stats = CheckpointStats::new(1_500_000_000, checkpoint_tx, tx_per_day);
        let chain_tx = checkpoint_tx.saturating_add_signed(delta);
        let estimator = ProgressEstimator::with_clock(Arc::new(CheckpointTable::empty(stats)), move || now);

        let p = estimator.estimate_progress(Some(&block(0, chain_tx, ts)), use_sigchecks);
        prop_assert!((0.0..=1.0).contains(&p), "progress {} out of range", p);

        let at_boundary = estimator.estimate_progress(Some(&block(0, checkpoint_tx, ts)), use_sigchecks);
        prop_assert!((0.0..=1.0).contains(&at_boundary), "boundary progress {}", at_boundary);
    }

    #[test]
    fn progress_never_decreases_with_tx_count(
        checkpoint_tx in 0u64..1_000_000,
        tx_per_day in 0.0f64..50_000.0,
        counts in prop::collection::vec(0u64..2_000_000, 2..20),
        ts_offset in 0u64..10_000_000,
        now_offset in 0u64..20_000_000,
    ) {
        let base = 1_500_000_000u64;
        let stats = CheckpointStats::new(base, checkpoint_tx, tx_per_day);
        let mut counts = counts;
        counts.sort_unstable();

        let progress: Vec<f64> = counts
            .iter()
            .map(|&c| {
                let b = BlockSummary { height: 0, chain_tx_count: c, timestamp: base + ts_offset };
                guess_verification_progress(&stats, Some(&b), base + now_offset, SIGCHECK_VERIFICATION_FACTOR)
            })
            .collect();
        for w in progress.windows(2) {
            prop_assert!(w[0] <= w[1] + 1e-12, "{:?}", progress);
        }
    }
}
