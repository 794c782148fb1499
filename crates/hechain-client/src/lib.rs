//! hechain-client
//!
//! Client-side configuration for HEChain: the persisted client config, the
//! pre-run step that settles it against a known network, and the client
//! handle the `hechainc` commands run against.

pub mod client;
pub mod config;
pub mod error;

pub use client::{pre_run, version_banner, CommandLineClient};
pub use config::ClientConfig;
pub use error::ClientError;
