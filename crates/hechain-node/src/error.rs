use std::path::PathBuf;

use thiserror::Error;

use hechain_core::error::HechainError;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error(transparent)]
    Chain(#[from] HechainError),

    // ── API authentication ───────────────────────────────────────────────────
    #[error("password cannot be blank")]
    BlankPassword,

    #[error(transparent)]
    PasswordPrompt(std::io::Error),

    // ── Modules ──────────────────────────────────────────────────────────────
    #[error("unknown module identifier {0:?}")]
    UnknownModule(char),

    #[error("module {module} requires module {dependency}")]
    MissingModuleDependency {
        module: &'static str,
        dependency: &'static str,
    },

    #[error("no modules selected")]
    NoModules,

    // ── Addresses ────────────────────────────────────────────────────────────
    #[error("invalid {which} address: {reason}")]
    InvalidAddress { which: &'static str, reason: String },

    #[error("refusing to bind the API to non-local address {0} without --allow-api-bind")]
    ApiBindNotAllowed(String),

    // ── I/O ──────────────────────────────────────────────────────────────────
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}
