//! DAO ledger daemon — replay an operations log and print the resulting state.

mod config;
mod report;

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

use dao_governance::{GovernanceLedger, LedgerOp, LedgerSnapshot};
use dao_types::Timestamp;
use dao_utils::LogFormat;

use crate::config::DaoConfig;
use crate::report::LedgerReport;

#[derive(Parser)]
#[command(name = "dao-daemon", about = "Membership DAO ledger tool")]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, env = "DAO_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "DAO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "DAO_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Apply a JSON array of ledger operations and print the final state.
    Replay {
        /// JSON file containing the operations.
        ops: PathBuf,

        /// Start from this snapshot instead of the configured genesis members.
        #[arg(long)]
        snapshot_in: Option<PathBuf>,

        /// Write a snapshot of the final state here.
        #[arg(long)]
        snapshot_out: Option<PathBuf>,

        /// Report time in Unix seconds (defaults to now).
        #[arg(long)]
        as_of: Option<u64>,
    },
    /// Print the effective configuration as TOML.
    ShowConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DaoConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DaoConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    dao_utils::init_logging(config.log_format, &config.log_level);

    match cli.command {
        Command::Replay {
            ops,
            snapshot_in,
            snapshot_out,
            as_of,
        } => {
            let mut ledger = match snapshot_in {
                Some(path) => load_snapshot(&path)?,
                None => genesis_ledger(&config)?,
            };
            let ops = load_ops(&ops)?;
            let applied = ledger.replay(&ops)?;
            tracing::info!(applied, "replay finished");

            let as_of = as_of.map(Timestamp::new).unwrap_or_else(Timestamp::now);
            if let Some(path) = snapshot_out {
                let bytes = ledger.snapshot(as_of).to_bytes()?;
                std::fs::write(&path, bytes)
                    .with_context(|| format!("writing snapshot {}", path.display()))?;
                tracing::info!("snapshot written to {}", path.display());
            }

            let report = LedgerReport::build(&ledger, as_of);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::ShowConfig => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

/// Build a ledger and admit the configured genesis members.
fn genesis_ledger(config: &DaoConfig) -> anyhow::Result<GovernanceLedger> {
    let mut ledger = GovernanceLedger::with_params(config.params.clone())?;
    let at = Timestamp::new(config.start_time);
    for member in &config.genesis_members {
        ledger.admit_member(*member, at)?;
    }
    tracing::info!(
        members = ledger.member_count(),
        supply = %ledger.total_supply(),
        "genesis ledger ready"
    );
    Ok(ledger)
}

fn load_ops(path: &Path) -> anyhow::Result<Vec<LedgerOp>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading operations {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing operations {}", path.display()))
}

fn load_snapshot(path: &Path) -> anyhow::Result<GovernanceLedger> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading snapshot {}", path.display()))?;
    let snapshot = LedgerSnapshot::from_bytes(&bytes)?;
    Ok(GovernanceLedger::from_snapshot(snapshot)?)
}
