//! Initial-sync verification progress.
//!
//! Work is measured per transaction: 1.0 for every transaction up to the last
//! checkpoint, and `factor` for every transaction after it, since those need
//! full signature checks. Transactions not yet seen are extrapolated from the
//! elapsed wall-clock time and the table's transactions-per-day estimate.
//! Progress is `work_before / (work_before + work_after)`.

use std::fmt;
use std::sync::Arc;

use tollgate_core::constants::{SECONDS_PER_DAY, SIGCHECK_VERIFICATION_FACTOR};
use tollgate_core::traits::BlockRecord;
use tracing::warn;

use crate::selector::NetworkSelector;
use crate::table::CheckpointStats;

/// Whether `factor` is usable as a sigcheck multiplier: finite and positive.
pub fn is_valid_sigcheck_factor(factor: f64) -> bool {
    factor.is_finite() && factor > 0.0
}

/// Estimate transactions generated in the `elapsed` seconds.
fn extrapolate(elapsed: u64, tx_per_day: f64) -> f64 {
    elapsed as f64 / SECONDS_PER_DAY * tx_per_day
}

/// Guess how far verification has got at `block`, in `[0.0, 1.0]`.
///
/// - No block yet: `0.0`.
/// - Zero total work (nothing left to verify): `1.0`.
///
/// Elapsed times saturate at zero, so a clock behind the block or checkpoint
/// timestamp counts as "no time has passed" rather than negative work. A
/// `factor` that is not finite and positive is replaced by
/// [`SIGCHECK_VERIFICATION_FACTOR`].
pub fn guess_verification_progress<B: BlockRecord + ?Sized>(
    stats: &CheckpointStats,
    block: Option<&B>,
    now: u64,
    factor: f64,
) -> f64 {
    let Some(block) = block else {
        return 0.0;
    };
    let factor = if is_valid_sigcheck_factor(factor) {
        factor
    } else {
        SIGCHECK_VERIFICATION_FACTOR
    };

    let chain_tx = block.chain_tx_count();
    let checkpoint_tx = stats.last_checkpoint_tx_count;

    let (work_before, work_after) = if chain_tx <= checkpoint_tx {
        let cheap_before = chain_tx as f64;
        let cheap_after = (checkpoint_tx - chain_tx) as f64;
        let expensive_after =
            extrapolate(now.saturating_sub(stats.last_checkpoint_time), stats.tx_per_day);
        (cheap_before, cheap_after + expensive_after * factor)
    } else {
        let cheap_before = checkpoint_tx as f64;
        let expensive_before = (chain_tx - checkpoint_tx) as f64;
        let expensive_after = extrapolate(now.saturating_sub(block.timestamp()), stats.tx_per_day);
        (cheap_before + expensive_before * factor, expensive_after * factor)
    };

    let total = work_before + work_after;
    if total <= 0.0 {
        return 1.0;
    }
    (work_before / total).clamp(0.0, 1.0)
}

/// Sync-progress estimator bound to the active checkpoint table.
pub struct ProgressEstimator {
    selector: Arc<dyn NetworkSelector>,
    clock: Box<dyn Fn() -> u64 + Send + Sync>,
    sigcheck_factor: f64,
}

impl fmt::Debug for ProgressEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressEstimator")
            .field("sigcheck_factor", &self.sigcheck_factor)
            .finish_non_exhaustive()
    }
}

impl ProgressEstimator {
    /// Create an estimator using the system clock and
    /// [`SIGCHECK_VERIFICATION_FACTOR`].
    pub fn new(selector: Arc<dyn NetworkSelector>) -> Self {
        Self::with_clock(selector, || {
            u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
        })
    }

    /// Create an estimator with a custom clock (Unix seconds) for testing.
    pub fn with_clock(
        selector: Arc<dyn NetworkSelector>,
        clock: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            selector,
            clock: Box::new(clock),
            sigcheck_factor: SIGCHECK_VERIFICATION_FACTOR,
        }
    }

    /// Override the post-checkpoint cost multiplier.
    ///
    /// A factor that is not finite and positive is ignored and the current
    /// one kept.
    pub fn with_sigcheck_factor(mut self, factor: f64) -> Self {
        if is_valid_sigcheck_factor(factor) {
            self.sigcheck_factor = factor;
        } else {
            warn!(factor, kept = self.sigcheck_factor, "ignoring invalid sigcheck factor");
        }
        self
    }

    pub fn sigcheck_factor(&self) -> f64 {
        self.sigcheck_factor
    }

    /// Estimate progress at `block`.
    ///
    /// With `use_sigchecks` false the post-checkpoint multiplier is 1.0, for
    /// pipelines that skip full signature checks.
    pub fn estimate_progress<B: BlockRecord + ?Sized>(&self, block: Option<&B>, use_sigchecks: bool) -> f64 {
        let factor = if use_sigchecks { self.sigcheck_factor } else { 1.0 };
        let stats = self.selector.active_table().stats();
        guess_verification_progress(stats, block, (self.clock)(), factor)
    }
}
