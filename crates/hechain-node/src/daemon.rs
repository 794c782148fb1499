use std::path::PathBuf;

use tracing::{info, warn};

use hechain_core::error::HechainError;
use hechain_core::transaction::TransactionRegistry;
use hechain_core::types::NetAddress;
use hechain_genesis::NetworkConfig;

use crate::config::DaemonConfig;
use crate::error::DaemonError;

/// Everything the daemon settled on before it starts serving.
#[derive(Debug)]
pub struct DaemonState {
    pub network: NetworkConfig,
    pub registry: TransactionRegistry,
    pub api_addr: NetAddress,
    pub rpc_addr: NetAddress,
    /// Storage directory of each enabled module, in start-up order.
    pub module_dirs: Vec<PathBuf>,
}

/// Runs a daemon from a processed [`DaemonConfig`].
///
/// The network is not known to the daemon itself: the caller injects a
/// setup function that resolves the configured network name and registers
/// its transaction versions into the registry the daemon owns.
pub struct Daemon {
    config: DaemonConfig,
}

impl Daemon {
    pub fn new(config: DaemonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DaemonConfig {
        &self.config
    }

    /// Resolve the network and lay out storage. Nothing touches chain data
    /// before `setup` has registered the network's transaction versions.
    pub fn prepare<F>(&self, setup: F) -> Result<DaemonState, DaemonError>
    where
        F: FnOnce(&str, &mut TransactionRegistry) -> Result<NetworkConfig, HechainError>,
    {
        let cfg = &self.config;

        let mut registry = TransactionRegistry::with_defaults();
        let mut network = setup(&cfg.blockchain_info.network_name, &mut registry)?;

        network.constants.validate()?;
        // the genesis block itself must be valid under the active versions
        registry.controller(network.constants.genesis_transaction_version)?;

        let api_addr: NetAddress = cfg.api_addr.parse().map_err(|reason| {
            DaemonError::InvalidAddress {
                which: "API",
                reason,
            }
        })?;
        if !api_addr.is_loopback() && !cfg.allow_api_bind {
            return Err(DaemonError::ApiBindNotAllowed(api_addr.to_string()));
        }
        let rpc_addr: NetAddress = cfg.rpc_addr.parse().map_err(|reason| {
            DaemonError::InvalidAddress {
                which: "RPC",
                reason,
            }
        })?;

        if cfg.no_bootstrap && !network.bootstrap_peers.is_empty() {
            info!(
                skipped = network.bootstrap_peers.len(),
                "bootstrap peers disabled"
            );
            network.bootstrap_peers.clear();
        }

        let mut module_dirs = Vec::new();
        for module in cfg.modules.iter() {
            let dir = cfg.root_persistent_dir.join(module.name);
            std::fs::create_dir_all(&dir).map_err(|source| DaemonError::Io {
                path: dir.clone(),
                source,
            })?;
            module_dirs.push(dir);
        }

        if cfg.authenticate_api {
            info!("API authentication enabled");
        } else if !api_addr.is_loopback() {
            warn!(%api_addr, "API is reachable from other hosts without authentication");
        }

        info!(
            network = %network.network,
            modules = %cfg.modules,
            root = %cfg.root_persistent_dir.display(),
            %api_addr,
            %rpc_addr,
            user_agent = %cfg.required_user_agent,
            "daemon prepared"
        );

        Ok(DaemonState {
            network,
            registry,
            api_addr,
            rpc_addr,
            module_dirs,
        })
    }

    /// Prepare, then hold the process until it is interrupted.
    pub async fn run<F>(self, setup: F) -> Result<(), DaemonError>
    where
        F: FnOnce(&str, &mut TransactionRegistry) -> Result<NetworkConfig, HechainError>,
    {
        let state = self.prepare(setup)?;
        info!(
            network = %state.network.network,
            modules = state.module_dirs.len(),
            "daemon ready"
        );

        tokio::signal::ctrl_c().await.map_err(DaemonError::Signal)?;
        info!("interrupt received, shutting down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hechain_core::chain::BlockchainInfo;
    use hechain_core::transaction::TransactionVersion;
    use hechain_genesis::setup_network;

    fn daemon(network: &str, root: &std::path::Path) -> DaemonConfig {
        let mut cfg = DaemonConfig::new(BlockchainInfo::hechain(network).unwrap()).unwrap();
        cfg.root_persistent_dir = root.to_path_buf();
        cfg.with_network_dir()
    }

    #[test]
    fn prepares_devnet() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = daemon("devnet", tmp.path());
        let state = Daemon::new(cfg).prepare(setup_network).unwrap();

        assert_eq!(state.network.constants.block_frequency, 12);
        assert!(!state.registry.is_enabled(TransactionVersion::ZERO));
        assert!(state.registry.is_enabled(TransactionVersion::ONE));
        assert_eq!(state.module_dirs.len(), 5);
        for dir in &state.module_dirs {
            assert!(dir.starts_with(tmp.path().join("devnet")));
            assert!(dir.is_dir());
        }
    }

    #[test]
    fn unknown_network_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = daemon("mainnet", tmp.path());
        let err = Daemon::new(cfg).prepare(setup_network).unwrap_err();
        assert!(matches!(
            err,
            DaemonError::Chain(HechainError::UnrecognizedNetwork(ref name)) if name == "mainnet"
        ));
        assert!(!tmp.path().join("mainnet").exists());
    }

    #[test]
    fn public_api_requires_opt_in() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cfg = daemon("testnet", tmp.path());
        cfg.api_addr = "0.0.0.0:23110".to_string();
        let err = Daemon::new(cfg.clone()).prepare(setup_network).unwrap_err();
        assert!(matches!(err, DaemonError::ApiBindNotAllowed(_)));

        cfg.allow_api_bind = true;
        Daemon::new(cfg).prepare(setup_network).unwrap();
    }

    #[test]
    fn setup_must_keep_genesis_version_enabled() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = daemon("testnet", tmp.path());
        let err = Daemon::new(cfg)
            .prepare(|name, registry| {
                let network = setup_network(name, registry)?;
                registry.register(TransactionVersion::ONE, None);
                Ok(network)
            })
            .unwrap_err();
        assert!(matches!(
            err,
            DaemonError::Chain(HechainError::DisabledTransactionVersion(1))
        ));
    }

    #[test]
    fn no_bootstrap_drops_peers() {
        let with_peer = |name: &str,
                         registry: &mut TransactionRegistry|
         -> Result<NetworkConfig, HechainError> {
            let mut network = setup_network(name, registry)?;
            network
                .bootstrap_peers
                .push("1.2.3.4:23112".parse().expect("peer address"));
            Ok(network)
        };

        let tmp = tempfile::tempdir().unwrap();
        let mut cfg = daemon("testnet", tmp.path());
        let state = Daemon::new(cfg.clone()).prepare(with_peer).unwrap();
        assert_eq!(state.network.bootstrap_peers.len(), 1);
        assert_eq!(state.network.bootstrap_peers[0].port(), "23112");

        cfg.no_bootstrap = true;
        let state = Daemon::new(cfg).prepare(with_peer).unwrap();
        assert!(state.network.bootstrap_peers.is_empty());
    }

    #[test]
    fn invalid_rpc_address_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cfg = daemon("testnet", tmp.path());
        cfg.rpc_addr = "nowhere".to_string();
        let err = Daemon::new(cfg).prepare(setup_network).unwrap_err();
        assert!(matches!(err, DaemonError::InvalidAddress { which: "RPC", .. }));
    }
}
