//! hechain-genesis
//!
//! Genesis parameters of the Human Energy networks and the dispatch that
//! selects them by name.
//!
//! Networks:
//!
//! 1. `testnet`: 2 minute blocks, 1000 block difficulty window, 0.1 HET fee
//! 2. `devnet`:  12 second blocks, 20 block difficulty window, 1 HET fee
//!
//! Both mint 100,000,000 HET and 3,000 block stakes to a single address in
//! the genesis block, and both disable transaction version 0.

pub mod network;
pub mod params;

pub use network::{
    register_transaction_versions, resolve_network, setup_network, version_suffix, Network,
    NetworkConfig, NETWORK_NAME_DEV, NETWORK_NAME_STANDARD, NETWORK_NAME_TEST,
};
pub use params::{
    currency_units, devnet_genesis, testnet_bootstrap_peers, testnet_genesis,
    verify_genesis_literals,
};

use hechain_core::chain::BlockchainInfo;
use hechain_core::error::HechainError;

/// Naming and versioning of hechain. Defaults to the test network, which is
/// what a fresh daemon or client joins unless told otherwise.
pub fn blockchain_info() -> Result<BlockchainInfo, HechainError> {
    BlockchainInfo::hechain(NETWORK_NAME_TEST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_info_is_testnet() {
        let info = blockchain_info().unwrap();
        assert_eq!(info.name, "hechain");
        assert_eq!(info.coin_unit, "HET");
        assert_eq!(info.network_name.parse::<Network>().unwrap(), Network::Test);
    }
}
