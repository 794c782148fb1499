//! hechaind: the HEChain daemon.
//!
//! Startup sequence:
//!   1. Check the hard-coded genesis literals
//!   2. Parse flags (usage errors exit with code 64)
//!   3. Give the network its own storage directory
//!   4. Settle the API password, prompting for one if required
//!   5. Hand off to the daemon runner with the network setup injected

use std::fmt::Display;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use hechain_core::chain::BlockchainInfo;
use hechain_core::constants::{DEFAULT_USER_AGENT, EXIT_CODE_GENERAL, EXIT_CODE_USAGE};
use hechain_genesis::{setup_network, verify_genesis_literals, NETWORK_NAME_TEST};
use hechain_node::config::{expand_tilde, DEFAULT_API_ADDR, DEFAULT_ROOT_DIR, DEFAULT_RPC_ADDR};
use hechain_node::modules::write_description;
use hechain_node::{
    process_config, version_banner, Daemon, DaemonConfig, DaemonError, ModuleSet, DEFAULT_MODULES,
};

#[derive(Parser, Debug)]
#[command(
    name = "hechaind",
    about = "HEChain daemon, full node of the Human Energy chain"
)]
struct Cli {
    #[command(flatten)]
    daemon: DaemonArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug)]
struct DaemonArgs {
    /// Network to join (testnet or devnet).
    #[arg(long, global = true, default_value = NETWORK_NAME_TEST)]
    network: String,

    /// Root directory for persistent data; a subdirectory per network is used.
    #[arg(short = 'd', long = "root-dir", global = true, default_value = DEFAULT_ROOT_DIR)]
    root_dir: PathBuf,

    /// Address the HTTP API listens on.
    #[arg(long, default_value = DEFAULT_API_ADDR)]
    api_addr: String,

    /// Address peers connect to.
    #[arg(long, default_value = DEFAULT_RPC_ADDR)]
    rpc_addr: String,

    /// Allow the API to listen on a non-local address.
    #[arg(long)]
    allow_api_bind: bool,

    /// Require a password for API calls.
    #[arg(long)]
    authenticate_api: bool,

    /// API password; prompted for when authentication is on and none is given.
    #[arg(long, env = "HECHAIN_API_PASSWORD", hide_env_values = true)]
    api_password: Option<String>,

    /// User agent peers must present.
    #[arg(long = "agent", default_value = DEFAULT_USER_AGENT)]
    required_user_agent: String,

    /// Modules to run, by identifier (see `hechaind modules`).
    #[arg(short = 'M', long, default_value = DEFAULT_MODULES)]
    modules: ModuleSet,

    /// Do not connect to the network's bootstrap peers.
    #[arg(long)]
    no_bootstrap: bool,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print version information.
    Version,
    /// List the available modules.
    Modules,
}

impl DaemonArgs {
    fn into_config(self, blockchain_info: BlockchainInfo) -> DaemonConfig {
        DaemonConfig {
            blockchain_info,
            api_addr: self.api_addr,
            rpc_addr: self.rpc_addr,
            allow_api_bind: self.allow_api_bind,
            authenticate_api: self.authenticate_api,
            api_password: self.api_password.map(Zeroizing::new),
            required_user_agent: self.required_user_agent,
            root_persistent_dir: expand_tilde(&self.root_dir),
            modules: self.modules,
            no_bootstrap: self.no_bootstrap,
            verbose: self.verbose,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = verify_genesis_literals() {
        die_with_error("corrupt genesis constants", e);
    }

    let cli = Cli::try_parse().unwrap_or_else(|e| exit_usage(e));

    let info = BlockchainInfo::hechain(&cli.daemon.network)
        .unwrap_or_else(|e| die_with_error("invalid build version", e));
    let config = cli.daemon.into_config(info);
    init_tracing(config.verbose);

    match cli.command {
        Some(Command::Version) => print!("{}", version_banner(&config.blockchain_info)),
        Some(Command::Modules) => {
            if let Err(e) = write_description(&mut io::stdout().lock()) {
                die_with_error("failed to write usage of the modules flag", e);
            }
        }
        None => root_command(config).await,
    }
}

async fn root_command(config: DaemonConfig) {
    let mut config = config.with_network_dir();

    if let Err(e) =
        config.resolve_api_password(|| rpassword::prompt_password("Enter API password: "))
    {
        let description = match e {
            DaemonError::PasswordPrompt(_) => "failed to ask for API password",
            _ => "failed to configure daemon",
        };
        die_with_error(description, e);
    }

    let config = process_config(config);
    info!(
        network = %config.blockchain_info.network_name,
        root = %config.root_persistent_dir.display(),
        "HEChain daemon starting"
    );

    if let Err(e) = Daemon::new(config).run(setup_network).await {
        die_with_error("daemon failed", e);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug"
    } else {
        "info,hechain_node=debug,hechain_genesis=debug"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Print `description: err` to stderr and exit with the general failure code.
fn die_with_error(description: &str, err: impl Display) -> ! {
    eprintln!("{description}: {err}");
    process::exit(EXIT_CODE_GENERAL)
}

/// Help and version requests exit cleanly; everything else is a usage error.
fn exit_usage(err: clap::Error) -> ! {
    let _ = err.print();
    if err.use_stderr() {
        process::exit(EXIT_CODE_USAGE)
    }
    process::exit(0)
}
