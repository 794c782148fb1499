use tracing::debug;

use hechain_core::chain::{BlockchainInfo, DaemonConstants};
use hechain_core::constants::CHAIN_NAME;
use hechain_core::transaction::TransactionRegistry;
use hechain_genesis::{
    blockchain_info, register_transaction_versions, testnet_genesis, version_suffix, Network,
};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Settle the configuration a client runs with.
///
/// Without a persisted config the client assumes the default network and
/// derives everything from its genesis parameters. Either way the network
/// name must resolve, and its transaction versions are registered into
/// `registry` before any command runs.
pub fn pre_run(
    persisted: Option<ClientConfig>,
    registry: &mut TransactionRegistry,
) -> Result<ClientConfig, ClientError> {
    let config = match persisted {
        Some(cfg) => cfg,
        None => {
            let info = blockchain_info()?;
            let constants = testnet_genesis()?;
            ClientConfig::from_daemon_constants(&DaemonConstants::new(&info, &constants))
        }
    };

    if config.chain_name != CHAIN_NAME {
        return Err(ClientError::ChainMismatch {
            expected: CHAIN_NAME.to_string(),
            got: config.chain_name,
        });
    }

    let network: Network = config.network_name.parse()?;
    register_transaction_versions(network, registry);
    debug!(%network, "client pre-run complete");
    Ok(config)
}

/// A client bound to one chain and the daemon it talks to.
#[derive(Debug)]
pub struct CommandLineClient {
    pub address: String,
    pub name: String,
    pub user_agent: String,
    registry: TransactionRegistry,
    config: Option<ClientConfig>,
}

impl CommandLineClient {
    pub fn new(
        address: impl Into<String>,
        name: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            user_agent: user_agent.into(),
            registry: TransactionRegistry::with_defaults(),
            config: None,
        }
    }

    /// Run [`pre_run`] against this client's registry and keep the result.
    pub fn pre_run(
        &mut self,
        persisted: Option<ClientConfig>,
    ) -> Result<&ClientConfig, ClientError> {
        let config = pre_run(persisted, &mut self.registry)?;
        Ok(&*self.config.insert(config))
    }

    /// `None` until [`CommandLineClient::pre_run`] succeeded.
    pub fn config(&self) -> Option<&ClientConfig> {
        self.config.as_ref()
    }

    pub fn registry(&self) -> &TransactionRegistry {
        &self.registry
    }
}

/// Text printed by `hechainc version`.
pub fn version_banner(info: &BlockchainInfo) -> String {
    format!(
        "{} Client v{}{}\nProtocol v{}\n\nBuild        v{}\nOS           {}\nARCH         {}\n",
        info.title_name(),
        info.chain_version,
        version_suffix(&info.network_name),
        info.protocol_version,
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hechain_core::error::HechainError;
    use hechain_core::transaction::TransactionVersion;

    #[test]
    fn defaults_to_testnet() {
        let mut registry = TransactionRegistry::with_defaults();
        let cfg = pre_run(None, &mut registry).unwrap();
        assert_eq!(cfg.network_name, "testnet");
        assert_eq!(cfg.block_frequency_in_seconds, 120);
        assert!(!registry.is_enabled(TransactionVersion::ZERO));
    }

    #[test]
    fn persisted_config_wins() {
        let persisted = ClientConfig::for_network(Network::Development).unwrap();
        let mut client = CommandLineClient::new("localhost:23110", "hechain", "HEChain-Agent");
        let cfg = client.pre_run(Some(persisted.clone())).unwrap();
        assert_eq!(cfg, &persisted);
        assert!(!client.registry().is_enabled(TransactionVersion::ZERO));
        assert!(client.registry().is_enabled(TransactionVersion::ONE));
    }

    #[test]
    fn unknown_network_is_rejected() {
        let mut persisted = ClientConfig::for_network(Network::Test).unwrap();
        persisted.network_name = "mainnet".to_string();
        let mut client = CommandLineClient::new("localhost:23110", "hechain", "HEChain-Agent");
        let err = client.pre_run(Some(persisted)).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Chain(HechainError::UnrecognizedNetwork(ref name)) if name == "mainnet"
        ));
        assert!(client.config().is_none());
    }

    #[test]
    fn foreign_chain_is_rejected() {
        let mut persisted = ClientConfig::for_network(Network::Test).unwrap();
        persisted.chain_name = "otherchain".to_string();
        let mut registry = TransactionRegistry::with_defaults();
        let err = pre_run(Some(persisted), &mut registry).unwrap_err();
        assert!(matches!(err, ClientError::ChainMismatch { .. }));
    }

    #[test]
    fn banner_names_the_client() {
        let info = BlockchainInfo::hechain("devnet").unwrap();
        let banner = version_banner(&info);
        assert_eq!(banner.lines().next(), Some("Hechain Client v0.1.0-dev"));
        assert!(banner.contains("Protocol v1.0.7"));
    }
}
