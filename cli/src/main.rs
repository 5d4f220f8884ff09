//! payrun — batch fund disbursement over a signing node.

mod config;
mod recipients;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use payrun_chain::NodeClient;
use payrun_dispatch::{
    DispatchEngine, DispatchError, DispatchSettings, RunReport, TokioScheduler,
};
use payrun_ledger::FileLedger;
use payrun_types::ChainAddress;

use config::Config;

/// Exit code when one or more batches ended in a persisted failure state.
const EXIT_PARTIAL: i32 = 2;

#[derive(Parser)]
#[command(name = "payrun", about = "Batch fund disbursement with durable recovery")]
struct Cli {
    /// Base URL of the signing node.
    #[arg(long, env = "PAYRUN_NODE_URL")]
    node_url: Option<String>,

    /// Sender account address.
    #[arg(long, env = "PAYRUN_SENDER")]
    sender: Option<String>,

    /// Denomination every transfer is paid in.
    #[arg(long, env = "PAYRUN_DENOM")]
    denom: Option<String>,

    /// Data directory for the settlement log and failure store.
    #[arg(long, env = "PAYRUN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Dispatch every batch of a recipient list.
    Run {
        /// JSON file with the recipient list.
        #[arg(long)]
        recipients: PathBuf,

        /// Maximum recipients per batch transaction.
        #[arg(long, env = "PAYRUN_BATCH_SIZE")]
        batch_size: Option<usize>,

        /// Retries per batch after the first attempt.
        #[arg(long, env = "PAYRUN_MAX_RETRIES")]
        max_retries: Option<u32>,

        /// Seconds between attempts on the same batch.
        #[arg(long, env = "PAYRUN_RETRY_DELAY")]
        retry_delay: Option<u64>,
    },

    /// Retry outstanding failed batches from the failure store.
    Resume {
        /// Retry only this batch number instead of all outstanding ones.
        #[arg(long)]
        batch: Option<u64>,

        /// Retries per batch after the first attempt.
        #[arg(long, env = "PAYRUN_MAX_RETRIES")]
        max_retries: Option<u32>,
    },
}

fn load_file_config(path: Option<&PathBuf>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(cfg) => {
                tracing::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file: {e}, using defaults");
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                "Failed to read config file {}: {e}, using defaults",
                path.display()
            );
            Config::default()
        }
    }
}

fn summarize(report: &RunReport) {
    for hash in &report.hashes {
        tracing::info!("settled: {hash}");
    }
    if report.fully_settled() {
        tracing::info!("all {} batches settled", report.settled.len());
    } else {
        tracing::error!(
            "{} batches remain in the failure store: {:?}; rerun `payrun resume`",
            report.failed.len(),
            report.failed,
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    payrun_utils::init_tracing();

    let cli = Cli::parse();
    let file_cfg = load_file_config(cli.config.as_ref());

    let config = Config {
        node_url: cli.node_url.unwrap_or(file_cfg.node_url),
        sender: cli.sender.or(file_cfg.sender),
        denom: cli.denom.unwrap_or(file_cfg.denom),
        data_dir: cli.data_dir.unwrap_or(file_cfg.data_dir),
        ..file_cfg
    };

    let sender = config
        .sender
        .clone()
        .context("sender address is required (--sender, PAYRUN_SENDER, or config file)")?;

    let chain = NodeClient::new(config.node_url.as_str(), ChainAddress::new(sender))
        .context("cannot create node client")?;
    let ledger = FileLedger::open(&config.data_dir)
        .with_context(|| format!("cannot open ledger at {}", config.data_dir.display()))?;

    let report = match cli.command {
        Command::Run {
            recipients: recipients_path,
            batch_size,
            max_retries,
            retry_delay,
        } => {
            let settings = DispatchSettings {
                batch_size: batch_size.unwrap_or(config.batch_size),
                max_retries: max_retries.unwrap_or(config.max_retries),
                retry_delay: Duration::from_secs(
                    retry_delay.unwrap_or(config.retry_delay_secs),
                ),
                denom: config.denom.clone(),
            };
            let list = recipients::load_recipients(&recipients_path)?;
            let mut engine = DispatchEngine::new(chain, ledger, TokioScheduler, settings);
            engine.run_all(&list).await?
        }
        Command::Resume { batch, max_retries } => {
            let settings = DispatchSettings {
                batch_size: config.batch_size,
                max_retries: max_retries.unwrap_or(config.max_retries),
                retry_delay: Duration::from_secs(config.retry_delay_secs),
                denom: config.denom.clone(),
            };
            let mut engine = DispatchEngine::new(chain, ledger, TokioScheduler, settings);
            match batch {
                Some(n) => match engine.resume_batch(n).await {
                    Ok(report) => report,
                    Err(DispatchError::NotFound(n)) => {
                        anyhow::bail!("no outstanding failure record for batch {n}");
                    }
                    Err(e) => return Err(e.into()),
                },
                None => engine.resume_all().await?,
            }
        }
    };

    summarize(&report);
    if !report.fully_settled() {
        std::process::exit(EXIT_PARTIAL);
    }
    Ok(())
}
