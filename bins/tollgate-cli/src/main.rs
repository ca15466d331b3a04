//! tollgate-cli: Operator interface for the checkpoint guard.
//!
//! Checks block hashes against the active checkpoint table, estimates sync
//! progress for a given block, and prints the active table. Settings come
//! from the config file and `TOLLGATE_*` environment variables, overridden
//! by command-line flags.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::DateTime;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tollgate_checkpoints::{CheckpointConfig, CheckpointGuard, ProgressEstimator};
use tollgate_core::constants::NetworkType;
use tollgate_core::error::CheckpointError;
use tollgate_core::types::{BlockSummary, Hash256};
use tracing::{debug, info};

/// Tollgate checkpoint guard command-line interface.
#[derive(Parser, Debug)]
#[command(name = "tollgate-cli")]
#[command(version, about = "Checkpoint-based chain-integrity guard")]
struct Cli {
    /// Config file (TOML). Defaults to <config dir>/tollgate/tollgate.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Network (main, test, regtest). Unknown names select regtest.
    #[arg(long, global = true)]
    network: Option<String>,

    /// Disable checkpoint enforcement.
    #[arg(long, global = true)]
    no_checkpoints: bool,

    /// Cost multiplier for post-checkpoint transactions.
    #[arg(long, global = true)]
    sigcheck_factor: Option<f64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a block hash against the checkpoint at its height.
    Check(CheckArgs),
    /// Estimate verification progress at a block.
    Progress(ProgressArgs),
    /// Print the last checkpointed height.
    Estimate,
    /// Print the active checkpoint table as JSON.
    Info,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Block height.
    height: u64,
    /// Block hash (hex, optional 0x prefix).
    hash: String,
}

#[derive(Args, Debug)]
struct ProgressArgs {
    /// Block height.
    #[arg(long, default_value_t = 0)]
    height: u64,
    /// Cumulative transaction count up to and including the block.
    #[arg(long)]
    tx_count: u64,
    /// Block timestamp (Unix seconds).
    #[arg(long)]
    timestamp: u64,
    /// Assume no signature checks after the last checkpoint (factor 1.0).
    #[arg(long)]
    no_sigchecks: bool,
    /// Evaluate at this Unix time instead of now.
    #[arg(long)]
    now: Option<u64>,
}

impl Cli {
    /// Load config from file and environment, then apply command-line overrides.
    fn resolve_config(&self) -> Result<CheckpointConfig> {
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            None => Some(CheckpointConfig::default_path()).filter(|p| p.exists()),
        };
        let mut config = CheckpointConfig::load(path.as_deref())
            .with_context(|| format!("failed to load config from {path:?}"))?;

        if let Some(network) = &self.network {
            config.network = NetworkType::from_id(network);
        }
        if self.no_checkpoints {
            config.enabled = false;
        }
        if let Some(factor) = self.sigcheck_factor {
            config.sigcheck_factor = factor;
        }
        config.validate().context("invalid --sigcheck-factor")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    let config = cli.resolve_config()?;
    info!(network = %config.network, enabled = config.enabled, "tollgate-cli v{}", env!("CARGO_PKG_VERSION"));
    debug!(?config, "resolved configuration");

    let selector = config.selector();
    let guard = config.guard(Arc::clone(&selector));

    match cli.command {
        Commands::Check(args) => {
            let hash: Hash256 = args
                .hash
                .parse()
                .with_context(|| format!("invalid block hash '{}'", args.hash))?;
            guard.check_block(args.height, &hash)?;
            println!("ok: block {} at height {} passes checkpoints", hash, args.height);
        }
        Commands::Progress(args) => {
            let estimator = match args.now {
                Some(now) => ProgressEstimator::with_clock(selector, move || now)
                    .with_sigcheck_factor(config.sigcheck_factor),
                None => config.estimator(selector),
            };
            let block = BlockSummary {
                height: args.height,
                chain_tx_count: args.tx_count,
                timestamp: args.timestamp,
            };
            let progress = estimator.estimate_progress(Some(&block), !args.no_sigchecks);
            println!("{progress:.6}");
        }
        Commands::Estimate => match guard.try_total_blocks_estimate() {
            Ok(height) => println!("{height}"),
            Err(CheckpointError::EmptyTable) => println!("no estimate available"),
            Err(e) => bail!(e),
        },
        Commands::Info => {
            println!("{}", serde_json::to_string_pretty(&table_json(&config, &guard))?);
        }
    }

    Ok(())
}

/// JSON view of the active table.
fn table_json(config: &CheckpointConfig, guard: &CheckpointGuard) -> serde_json::Value {
    let table = guard.active_table();
    let stats = table.stats();
    let last_time = i64::try_from(stats.last_checkpoint_time)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339());
    let pins: Vec<_> = table
        .iter()
        .map(|(height, hash)| json!({ "height": height, "hash": hash.to_string() }))
        .collect();

    json!({
        "network": config.network,
        "enabled": guard.is_enabled(),
        "sigcheck_factor": config.sigcheck_factor,
        "checkpoints": pins,
        "last_checkpoint_time": stats.last_checkpoint_time,
        "last_checkpoint_time_utc": last_time,
        "last_checkpoint_tx_count": stats.last_checkpoint_tx_count,
        "tx_per_day": stats.tx_per_day,
    })
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Pass `format = "json"` for structured JSON output. Any other value
/// defaults to human-readable text. Logs go to stderr so stdout stays
/// machine-readable.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .init();
    }
}
