use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use hechain_core::chain::BlockchainInfo;
use hechain_core::constants::DEFAULT_USER_AGENT;

use crate::error::DaemonError;
use crate::modules::{ModuleSet, DEFAULT_MODULES};

/// Default address of the HTTP API.
pub const DEFAULT_API_ADDR: &str = "localhost:23110";

/// Default address peers connect to.
pub const DEFAULT_RPC_ADDR: &str = ":23112";

/// Default root of all persistent daemon data.
pub const DEFAULT_ROOT_DIR: &str = "~/.hechain";

/// Final configuration of a daemon process.
#[derive(Clone)]
pub struct DaemonConfig {
    pub blockchain_info: BlockchainInfo,
    pub api_addr: String,
    pub rpc_addr: String,
    /// Allow the API to listen on a non-loopback address.
    pub allow_api_bind: bool,
    pub authenticate_api: bool,
    pub api_password: Option<Zeroizing<String>>,
    pub required_user_agent: String,
    pub root_persistent_dir: PathBuf,
    pub modules: ModuleSet,
    /// Do not connect to the network's bootstrap peers.
    pub no_bootstrap: bool,
    pub verbose: bool,
}

impl DaemonConfig {
    /// Defaults for `blockchain_info`.
    pub fn new(blockchain_info: BlockchainInfo) -> Result<Self, DaemonError> {
        Ok(Self {
            blockchain_info,
            api_addr: DEFAULT_API_ADDR.to_string(),
            rpc_addr: DEFAULT_RPC_ADDR.to_string(),
            allow_api_bind: false,
            authenticate_api: false,
            api_password: None,
            required_user_agent: DEFAULT_USER_AGENT.to_string(),
            root_persistent_dir: expand_tilde(Path::new(DEFAULT_ROOT_DIR)),
            modules: DEFAULT_MODULES.parse()?,
            no_bootstrap: false,
            verbose: false,
        })
    }

    /// Give each network its own storage subdirectory so networks sharing a
    /// machine never collide.
    pub fn with_network_dir(mut self) -> Self {
        self.root_persistent_dir = self
            .root_persistent_dir
            .join(&self.blockchain_info.network_name);
        self
    }

    /// Settle the API password.
    ///
    /// With authentication on and no password supplied, `prompt` is asked for
    /// one; an empty result is an error. With authentication off the password
    /// is cleared, so the API never holds a credential it does not check.
    pub fn resolve_api_password<F>(&mut self, prompt: F) -> Result<(), DaemonError>
    where
        F: FnOnce() -> io::Result<String>,
    {
        if !self.authenticate_api {
            self.api_password = None;
            return Ok(());
        }

        let supplied = self.api_password.as_ref().is_some_and(|p| !p.is_empty());
        if !supplied {
            let entered = prompt().map_err(DaemonError::PasswordPrompt)?;
            self.api_password = Some(Zeroizing::new(entered));
        }

        match &self.api_password {
            Some(p) if !p.is_empty() => Ok(()),
            _ => Err(DaemonError::BlankPassword),
        }
    }
}

impl fmt::Debug for DaemonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DaemonConfig")
            .field("network", &self.blockchain_info.network_name)
            .field("api_addr", &self.api_addr)
            .field("rpc_addr", &self.rpc_addr)
            .field("allow_api_bind", &self.allow_api_bind)
            .field("authenticate_api", &self.authenticate_api)
            .field("api_password", &self.api_password.as_ref().map(|_| "<redacted>"))
            .field("required_user_agent", &self.required_user_agent)
            .field("root_persistent_dir", &self.root_persistent_dir)
            .field("modules", &self.modules.identifiers())
            .field("no_bootstrap", &self.no_bootstrap)
            .field("verbose", &self.verbose)
            .finish()
    }
}

/// Clean up slightly invalid values before the daemon sees them.
pub fn process_config(mut cfg: DaemonConfig) -> DaemonConfig {
    cfg.api_addr = process_net_addr(&cfg.api_addr);
    cfg.rpc_addr = process_net_addr(&cfg.rpc_addr);
    debug!(config = ?cfg, "daemon configuration processed");
    cfg
}

/// A bare port number `N` means `:N`.
fn process_net_addr(addr: &str) -> String {
    let addr = addr.trim();
    if addr.parse::<u16>().is_ok() {
        format!(":{addr}")
    } else {
        addr.to_string()
    }
}

/// Expand a leading `~` to the user's home directory (`HOME` or `USERPROFILE`).
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
            return PathBuf::from(home).join(stripped);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(network: &str) -> DaemonConfig {
        let mut cfg = DaemonConfig::new(BlockchainInfo::hechain(network).unwrap()).unwrap();
        cfg.root_persistent_dir = PathBuf::from("/var/lib/hechain");
        cfg
    }

    fn no_prompt() -> io::Result<String> {
        panic!("prompt must not be called")
    }

    #[test]
    fn network_dir_is_appended() {
        let cfg = config("devnet").with_network_dir();
        assert_eq!(cfg.root_persistent_dir, PathBuf::from("/var/lib/hechain/devnet"));
    }

    #[test]
    fn blank_password_is_rejected() {
        let mut cfg = config("testnet");
        cfg.authenticate_api = true;
        cfg.api_password = Some(Zeroizing::new(String::new()));
        let err = cfg.resolve_api_password(|| Ok(String::new())).unwrap_err();
        assert!(matches!(err, DaemonError::BlankPassword));
        assert_eq!(err.to_string(), "password cannot be blank");
    }

    #[test]
    fn missing_password_is_prompted_for() {
        let mut cfg = config("testnet");
        cfg.authenticate_api = true;
        cfg.resolve_api_password(|| Ok("hunter2".to_string())).unwrap();
        assert_eq!(cfg.api_password.as_deref().map(String::as_str), Some("hunter2"));
    }

    #[test]
    fn supplied_password_skips_prompt() {
        let mut cfg = config("testnet");
        cfg.authenticate_api = true;
        cfg.api_password = Some(Zeroizing::new("secret".to_string()));
        cfg.resolve_api_password(no_prompt).unwrap();
    }

    #[test]
    fn prompt_failure_is_reported() {
        let mut cfg = config("testnet");
        cfg.authenticate_api = true;
        let err = cfg
            .resolve_api_password(|| Err(io::Error::new(io::ErrorKind::NotFound, "no tty")))
            .unwrap_err();
        assert!(matches!(err, DaemonError::PasswordPrompt(_)));
        assert_eq!(err.to_string(), "no tty");
    }

    #[test]
    fn password_cleared_without_authentication() {
        let mut cfg = config("testnet");
        cfg.api_password = Some(Zeroizing::new("stray".to_string()));
        cfg.resolve_api_password(no_prompt).unwrap();
        assert!(cfg.api_password.is_none());
    }

    #[test]
    fn bare_ports_are_expanded() {
        let mut cfg = config("testnet");
        cfg.api_addr = "23110".to_string();
        cfg.rpc_addr = " 0.0.0.0:23112 ".to_string();
        let cfg = process_config(cfg);
        assert_eq!(cfg.api_addr, ":23110");
        assert_eq!(cfg.rpc_addr, "0.0.0.0:23112");
    }

    #[test]
    fn debug_redacts_password() {
        let mut cfg = config("testnet");
        cfg.api_password = Some(Zeroizing::new("topsecret".to_string()));
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("topsecret"));
        assert!(shown.contains("<redacted>"));
    }

    #[test]
    fn debug_shows_verbosity() {
        let mut cfg = config("testnet");
        assert!(format!("{cfg:?}").contains("verbose: false"));
        cfg.verbose = true;
        assert!(format!("{cfg:?}").contains("verbose: true"));
    }
}
