use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use hechain_core::chain::ChainConstants;
use hechain_core::error::HechainError;
use hechain_core::transaction::{TransactionRegistry, TransactionVersion};
use hechain_core::types::NetAddress;

use crate::params::{devnet_genesis, testnet_bootstrap_peers, testnet_genesis};

pub const NETWORK_NAME_TEST: &str = "testnet";
pub const NETWORK_NAME_DEV: &str = "devnet";

/// Label used by builds that are not bound to a test or dev network. Only
/// meaningful for the version banner; it cannot be resolved.
pub const NETWORK_NAME_STANDARD: &str = "standard";

// ── Network ──────────────────────────────────────────────────────────────────

/// The networks hechain ships parameters for. Names are mapped to variants
/// in exactly one place, [`Network::from_str`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "testnet")]
    Test,
    #[serde(rename = "devnet")]
    Development,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Test, Network::Development];

    pub fn name(&self) -> &'static str {
        match self {
            Network::Test => NETWORK_NAME_TEST,
            Network::Development => NETWORK_NAME_DEV,
        }
    }

    /// Suffix appended to the daemon version banner.
    pub fn version_suffix(&self) -> &'static str {
        match self {
            Network::Test => "-testing",
            Network::Development => "-dev",
        }
    }

    pub fn genesis(&self) -> Result<ChainConstants, HechainError> {
        match self {
            Network::Test => testnet_genesis(),
            Network::Development => devnet_genesis(),
        }
    }

    pub fn bootstrap_peers(&self) -> Vec<NetAddress> {
        match self {
            Network::Test => testnet_bootstrap_peers(),
            Network::Development => Vec::new(),
        }
    }
}

impl FromStr for Network {
    type Err = HechainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            NETWORK_NAME_TEST => Ok(Network::Test),
            NETWORK_NAME_DEV => Ok(Network::Development),
            other => Err(HechainError::UnrecognizedNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Version banner suffix for an arbitrary network name. Known networks use
/// [`Network::version_suffix`]; `standard` gets none and anything else gets
/// `-???`. Display only: an unknown name does not fail here.
pub fn version_suffix(network_name: &str) -> &'static str {
    match network_name.parse::<Network>() {
        Ok(network) => network.version_suffix(),
        Err(_) if network_name == NETWORK_NAME_STANDARD => "",
        Err(_) => "-???",
    }
}

// ── Selection ────────────────────────────────────────────────────────────────

/// Everything a daemon needs to join a network.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
    pub network: Network,
    pub constants: ChainConstants,
    pub bootstrap_peers: Vec<NetAddress>,
}

/// Genesis table and bootstrap peers for `name`. Unknown names are a fatal
/// configuration error.
pub fn resolve_network(name: &str) -> Result<NetworkConfig, HechainError> {
    let network: Network = name.parse()?;
    Ok(NetworkConfig {
        network,
        constants: network.genesis()?,
        bootstrap_peers: network.bootstrap_peers(),
    })
}

/// Register the transaction controllers for all transaction versions
/// supported on `network`. Idempotent.
pub fn register_transaction_versions(network: Network, registry: &mut TransactionRegistry) {
    match network {
        Network::Test | Network::Development => {
            // Version 0 was deprecated before hechain was created.
            registry.register(TransactionVersion::ZERO, None);
        }
    }
    debug!(%network, "transaction versions registered");
}

/// Resolve `name` and activate its transaction versions in `registry`. The
/// daemon and client both go through here so the two steps always agree on
/// the selected network.
pub fn setup_network(
    name: &str,
    registry: &mut TransactionRegistry,
) -> Result<NetworkConfig, HechainError> {
    let config = resolve_network(name)?;
    register_transaction_versions(config.network, registry);

    let genesis_date = chrono::DateTime::<chrono::Utc>::from_timestamp(
        config.constants.genesis_timestamp as i64,
        0,
    )
    .map(|dt| dt.to_rfc3339())
    .unwrap_or_default();
    info!(
        network = %config.network,
        block_frequency = config.constants.block_frequency,
        genesis = %genesis_date,
        bootstrap_peers = config.bootstrap_peers.len(),
        "network configured"
    );
    Ok(config)
}
