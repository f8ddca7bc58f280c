//! ballotbox: submit voting transactions against a local LMDB ledger.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use ballotbox_contract::{ContractError, Function, InitiatePolicy, TxContext, VotingContract};
use ballotbox_store::{CallerIdentity, StoreError};
use ballotbox_store_lmdb::{check_data_dir, check_integrity, LmdbEnvironment};
use ballotbox_types::VoterId;
use ballotbox_utils::{init_logging, LogFormat};
use clap::Parser;

use crate::config::DaemonConfig;

#[derive(Parser)]
#[command(name = "ballotbox", about = "Closed-ballot voting on an audited ledger")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "BALLOTBOX_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for ledger storage.
    #[arg(long, env = "BALLOTBOX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Authenticated identity of the caller (used as the voter key).
    #[arg(long, env = "BALLOTBOX_IDENTITY")]
    identity: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BALLOTBOX_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALLOTBOX_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Let `init` replace an existing voting instead of failing.
    #[arg(long)]
    allow_overwrite: bool,

    /// Pretty-print JSON responses.
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create a voting with a delimiter-separated list of options.
    Init { name: String, options: String },
    /// Close a voting; no further votes are accepted.
    Close { name: String },
    /// Cast or change the caller's vote.
    Vote { name: String, option: String },
    /// Show the current record.
    Read { name: String },
    /// Show the winner of a closed voting.
    Tally { name: String },
    /// Show per-option counts of a closed voting.
    Counts { name: String },
    /// Show every committed version of a voting.
    History { name: String },
    /// Call a contract function by name with positional arguments.
    Invoke {
        function: String,
        args: Vec<String>,
    },
    /// Verify the ledger databases.
    Check,
}

impl Command {
    /// Contract function name and arguments for this command.
    fn invocation(self) -> Option<(String, Vec<String>)> {
        let (function, args) = match self {
            Self::Init { name, options } => (Function::InitVoting, vec![name, options]),
            Self::Close { name } => (Function::CloseVoting, vec![name]),
            Self::Vote { name, option } => (Function::Vote, vec![name, option]),
            Self::Read { name } => (Function::ReadVoting, vec![name]),
            Self::Tally { name } => (Function::ReadWinner, vec![name]),
            Self::Counts { name } => (Function::ReadTally, vec![name]),
            Self::History { name } => (Function::ReadHistory, vec![name]),
            Self::Invoke { function, args } => return Some((function, args)),
            Self::Check => return None,
        };
        Some((function.as_str().to_string(), args))
    }
}

/// Identity taken from the command line or config file.
///
/// The ledger trusts whatever sits in front of it to have authenticated this
/// value; the CLI only refuses to vote without one.
struct ConfiguredIdentity(Option<VoterId>);

impl CallerIdentity for ConfiguredIdentity {
    fn caller_id(&self) -> Result<VoterId, StoreError> {
        self.0.clone().ok_or_else(|| {
            StoreError::Identity("no identity configured; pass --identity".to_string())
        })
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<DaemonConfig> {
    let mut config = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)?,
        None => DaemonConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(identity) = &cli.identity {
        config.identity = Some(identity.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if cli.allow_overwrite {
        config.contract.initiate_policy = InitiatePolicy::Overwrite;
    }
    Ok(config)
}

fn run(cli: Cli, config: DaemonConfig) -> anyhow::Result<()> {
    check_data_dir(&config.data_dir).map_err(anyhow::Error::msg)?;
    let ledger = LmdbEnvironment::open(&config.data_dir, config.max_dbs, config.map_size)
        .with_context(|| format!("failed to open ledger at {}", config.data_dir.display()))?;

    let pretty = cli.pretty;
    let Some((function, args)) = cli.command.invocation() else {
        let report = check_integrity(&ledger)?;
        println!(
            "checked {} databases, {} entries",
            report.databases_checked, report.total_entries
        );
        for error in &report.errors {
            println!("error: {error}");
        }
        anyhow::ensure!(report.is_healthy(), "ledger integrity check failed");
        return Ok(());
    };

    let identity = ConfiguredIdentity(
        config
            .identity
            .map(VoterId::parse)
            .transpose()
            .context("invalid identity")?,
    );
    let contract = VotingContract::new(config.contract);
    let mutating = function
        .parse::<Function>()
        .map(|f| f.is_mutating())
        .unwrap_or(false);

    tracing::debug!(%function, mutating, "submitting transaction");
    let response = if mutating {
        ledger.transact::<_, anyhow::Error, _>(|txn| {
            Ok(contract.invoke(&mut TxContext::new(txn, &identity), &function, &args)?)
        })?
    } else {
        // Queries never commit; the transaction is dropped and aborted.
        let mut txn = ledger.begin()?;
        contract.invoke(&mut TxContext::new(&mut txn, &identity), &function, &args)?
    };

    print_response(&response, pretty)
}

fn print_response(response: &[u8], pretty: bool) -> anyhow::Result<()> {
    if pretty {
        let value: serde_json::Value = serde_json::from_slice(response)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", String::from_utf8_lossy(response));
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    };

    if let Err(e) = init_logging(config.log_format, &config.log_level) {
        eprintln!("warning: logging disabled: {e}");
    }

    if let Err(e) = run(cli, config) {
        match e.downcast_ref::<ContractError>() {
            Some(contract_err) => eprintln!("error[{}]: {contract_err}", contract_err.kind()),
            None => eprintln!("error: {e:#}"),
        }
        std::process::exit(1);
    }
}
