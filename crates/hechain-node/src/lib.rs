//! hechain-node
//!
//! Daemon shell for HEChain: configuration, API password handling, module
//! selection and the runner that hands the selected network to the daemon.

pub mod config;
pub mod daemon;
pub mod error;
pub mod modules;
pub mod version;

pub use config::{process_config, DaemonConfig};
pub use daemon::{Daemon, DaemonState};
pub use error::DaemonError;
pub use modules::{ModuleSet, DEFAULT_MODULES};
pub use version::version_banner;
