use hechain_core::chain::BlockchainInfo;
use hechain_genesis::version_suffix;

/// Text printed by `hechaind version`.
pub fn version_banner(info: &BlockchainInfo) -> String {
    let mut out = format!(
        "{} Daemon v{}{}\n",
        info.title_name(),
        info.chain_version,
        version_suffix(&info.network_name)
    );
    out.push_str(&format!("Protocol v{}\n", info.protocol_version));
    out.push('\n');
    out.push_str(&format!("Build        v{}\n", env!("CARGO_PKG_VERSION")));
    out.push_str(&format!("OS           {}\n", std::env::consts::OS));
    out.push_str(&format!("ARCH         {}\n", std::env::consts::ARCH));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_line(network: &str) -> String {
        let info = BlockchainInfo::hechain(network).unwrap();
        version_banner(&info).lines().next().unwrap().to_string()
    }

    #[test]
    fn suffix_follows_network() {
        assert_eq!(first_line("testnet"), "Hechain Daemon v0.1.0-testing");
        assert_eq!(first_line("devnet"), "Hechain Daemon v0.1.0-dev");
        assert_eq!(first_line("standard"), "Hechain Daemon v0.1.0");
        assert_eq!(first_line("moonnet"), "Hechain Daemon v0.1.0-???");
    }

    #[test]
    fn lists_protocol_and_platform() {
        let info = BlockchainInfo::hechain("testnet").unwrap();
        let banner = version_banner(&info);
        assert!(banner.contains("Protocol v1.0.7"));
        assert!(banner.contains(std::env::consts::OS));
        assert!(banner.contains(std::env::consts::ARCH));
    }
}
