//! hechainc: command-line client for HEChain.
//!
//! Usage:
//!   hechainc config
//!   hechainc init       [--network <testnet|devnet>] [--force]
//!   hechainc constants
//!   hechainc version
//!
//! Every command but `init` first settles the client config: the persisted
//! one when present, testnet defaults otherwise.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hechain_client::config::{expand_tilde, CONFIG_FILE_NAME, DEFAULT_CLIENT_ROOT};
use hechain_client::{version_banner, ClientConfig, ClientError, CommandLineClient};
use hechain_core::chain::{BlockchainInfo, DaemonConstants};
use hechain_core::constants::{CHAIN_NAME, DEFAULT_USER_AGENT, EXIT_CODE_GENERAL, EXIT_CODE_USAGE};
use hechain_genesis::{verify_genesis_literals, Network, NETWORK_NAME_TEST};

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hechainc", about = "HEChain client")]
struct Args {
    /// Address of the daemon API.
    #[arg(long, global = true, default_value = "localhost:23110")]
    addr: String,

    /// User agent presented to the daemon.
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    agent: String,

    /// Root directory of the client config.
    #[arg(short = 'd', long = "root-dir", global = true, default_value = DEFAULT_CLIENT_ROOT)]
    root_dir: PathBuf,

    /// Explicit path of the client config file; overrides --root-dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the resolved client config.
    Config,

    /// Persist a client config built from a network's genesis parameters.
    Init {
        /// Network to configure the client for.
        #[arg(long, default_value = NETWORK_NAME_TEST)]
        network: String,
        /// Replace an existing config file.
        #[arg(long)]
        force: bool,
    },

    /// Print the genesis constants of the configured network as JSON.
    Constants,

    /// Print version information.
    Version,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    if let Err(e) = verify_genesis_literals() {
        die_with_error("corrupt genesis constants", e);
    }

    let args = Args::try_parse().unwrap_or_else(|e| exit_usage(e));

    let default = if args.verbose {
        "debug"
    } else {
        "warn,hechainc=info,hechain_client=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        die_with_error("hechainc", format!("{e:#}"));
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config_path = args
        .config
        .unwrap_or_else(|| expand_tilde(&args.root_dir).join(CONFIG_FILE_NAME));

    match args.command {
        Command::Init { network, force } => cmd_init(&network, force, &config_path),
        Command::Config => with_client(args.addr, args.agent, &config_path, cmd_config),
        Command::Constants => with_client(args.addr, args.agent, &config_path, cmd_constants),
        Command::Version => with_client(args.addr, args.agent, &config_path, cmd_version),
    }
}

/// Settle the client config, then hand the prepared client to `command`.
fn with_client(
    addr: String,
    agent: String,
    config_path: &Path,
    command: fn(&CommandLineClient, &ClientConfig) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let persisted = ClientConfig::load(config_path)?;
    let mut client = CommandLineClient::new(addr, CHAIN_NAME, agent);
    client.pre_run(persisted).context("preparing client")?;
    let Some(config) = client.config() else {
        bail!("client config unavailable after pre-run");
    };
    command(&client, config)
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_init(network: &str, force: bool, path: &Path) -> anyhow::Result<()> {
    let network: Network = network.parse()?;
    if path.exists() && !force {
        return Err(ClientError::ConfigExists(path.to_path_buf()).into());
    }
    let config = ClientConfig::for_network(network)?;
    config
        .save(path)
        .with_context(|| format!("writing client config for {network}"))?;
    info!(%network, path = %path.display(), "client config initialised");
    println!("Client config for {network} written to {}", path.display());
    Ok(())
}

fn cmd_config(client: &CommandLineClient, config: &ClientConfig) -> anyhow::Result<()> {
    println!("Client for chain:            {}", client.name);
    println!("Daemon address:              {}", client.address);
    println!("User agent:                  {}", client.user_agent);
    println!("{config}");
    Ok(())
}

fn cmd_version(_client: &CommandLineClient, config: &ClientConfig) -> anyhow::Result<()> {
    let info = BlockchainInfo::hechain(&config.network_name)?;
    print!("{}", version_banner(&info));
    Ok(())
}

fn cmd_constants(_client: &CommandLineClient, config: &ClientConfig) -> anyhow::Result<()> {
    let network: Network = config.network_name.parse()?;
    let info = BlockchainInfo::hechain(network.name())?;
    let constants = network.genesis()?;
    let json = serde_json::to_string_pretty(&DaemonConstants::new(&info, &constants))
        .context("encoding constants")?;
    println!("{json}");
    Ok(())
}

// ── Exits ─────────────────────────────────────────────────────────────────────

fn die_with_error(description: &str, err: impl Display) -> ! {
    eprintln!("{description}: {err}");
    process::exit(EXIT_CODE_GENERAL)
}

fn exit_usage(err: clap::Error) -> ! {
    let _ = err.print();
    if err.use_stderr() {
        process::exit(EXIT_CODE_USAGE)
    }
    process::exit(0)
}
