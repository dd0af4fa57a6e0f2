//! Error taxonomy shared by every stage of an unlock run.
//!
//! Only configuration errors are fatal. Everything raised while polling is
//! absorbed by the orchestrator, reported, and retried on the next pass.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, UnlockError>;

#[derive(Debug, thiserror::Error)]
pub enum UnlockError {
    /// Configuration is malformed or missing required fields.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// The configuration file itself could not be read.
    #[error("cannot read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file-backed secret could not be read while the secrets mode required it.
    #[error("cannot read secret file '{}': {source}", path.display())]
    SecretUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The appliance could not be reached (refused, timed out, DNS, TLS).
    #[error("request to appliance failed: {0}")]
    ApiTransport(#[from] reqwest::Error),

    /// The appliance answered, but not with something usable.
    #[error("appliance returned {status}: {message}")]
    ApiResponse { status: u16, message: String },
}

impl UnlockError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        UnlockError::ConfigInvalid(message.into())
    }
}
