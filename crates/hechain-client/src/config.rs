use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use hechain_core::chain::{BlockchainInfo, DaemonConstants};
use hechain_core::transaction::TransactionVersion;
use hechain_core::types::{BlockHeight, Currency, Timestamp};
use hechain_genesis::Network;

use crate::error::ClientError;

/// Default root of all persistent client data.
pub const DEFAULT_CLIENT_ROOT: &str = "~/.hechain";

/// File the client config is persisted to, under the client root.
pub const CONFIG_FILE_NAME: &str = "client.json";

/// What a client needs to know about the chain it talks to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub chain_name: String,
    pub network_name: String,
    pub chain_version: semver::Version,
    pub one_coin: Currency,
    pub minimum_transaction_fee: Currency,
    pub default_transaction_version: TransactionVersion,
    pub block_frequency_in_seconds: BlockHeight,
    pub genesis_block_timestamp: Timestamp,
}

impl ClientConfig {
    pub fn from_daemon_constants(constants: &DaemonConstants) -> Self {
        Self {
            chain_name: constants.chain_info.name.clone(),
            network_name: constants.chain_info.network_name.clone(),
            chain_version: constants.chain_info.chain_version.clone(),
            one_coin: constants.one_coin,
            minimum_transaction_fee: constants.minimum_transaction_fee,
            default_transaction_version: constants.default_transaction_version,
            block_frequency_in_seconds: constants.block_frequency,
            genesis_block_timestamp: constants.genesis_timestamp,
        }
    }

    /// Config for `network` built from its genesis parameters.
    pub fn for_network(network: Network) -> Result<Self, ClientError> {
        let info = BlockchainInfo::hechain(network.name())?;
        let constants = network.genesis()?;
        Ok(Self::from_daemon_constants(&DaemonConstants::new(
            &info, &constants,
        )))
    }

    /// Read a persisted config. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Option<Self>, ClientError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no persisted client config");
                return Ok(None);
            }
            Err(source) => {
                return Err(ClientError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let cfg = serde_json::from_str(&raw).map_err(|source| ClientError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(cfg))
    }

    pub fn save(&self, path: &Path) -> Result<(), ClientError> {
        let io_err = |source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ClientError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)?;
        debug!(path = %path.display(), network = %self.network_name, "client config saved");
        Ok(())
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chain name:                  {}", self.chain_name)?;
        writeln!(f, "Network name:                {}", self.network_name)?;
        writeln!(f, "Chain version:               {}", self.chain_version)?;
        writeln!(f, "One coin (units):            {}", self.one_coin)?;
        writeln!(f, "Minimum transaction fee:     {}", self.minimum_transaction_fee)?;
        writeln!(f, "Default transaction version: {}", self.default_transaction_version)?;
        writeln!(f, "Block frequency (seconds):   {}", self.block_frequency_in_seconds)?;
        write!(f, "Genesis block timestamp:     {}", self.genesis_block_timestamp)
    }
}

/// Resolve a leading `~` against the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
            return PathBuf::from(home).join(stripped);
        }
    }
    path.to_path_buf()
}
