use super::defaults::*;
use crate::error::{Result, UnlockError};
use crate::secrets::{SecretSource, SecretValue, SecretsMode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Dataset
// ============================================================================

/// An encrypted ZFS dataset managed by the appliance, e.g. `tank/media/photos`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    path: String,
    secret: SecretSource,
}

impl Dataset {
    /// Build a dataset entry. The path must be non-empty.
    pub fn new(path: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(UnlockError::invalid("dataset path must not be empty"));
        }
        Ok(Self {
            path,
            secret: SecretSource::new(secret),
        })
    }

    /// Full dataset path as the appliance knows it.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// First path segment.
    pub fn pool(&self) -> &str {
        self.path.split('/').next().unwrap_or_default()
    }

    /// Everything after the pool, or `""` for a pool-level dataset.
    pub fn name(&self) -> &str {
        self.path
            .split_once('/')
            .map(|(_, rest)| rest)
            .unwrap_or_default()
    }

    pub fn secret(&self) -> &SecretSource {
        &self.secret
    }

    /// Resolve the unlock passphrase. Re-reads file-backed secrets every call.
    pub fn passphrase(&self, mode: SecretsMode) -> Result<SecretValue> {
        self.secret.resolve(mode)
    }
}

// ============================================================================
// Timeouts
// ============================================================================

/// Per-request timeout policy for the appliance HTTP client, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub connect: f64,
    pub read: f64,
    pub write: f64,
    pub pool: f64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: DEFAULT_CONNECT_TIMEOUT_SECS,
            read: DEFAULT_READ_TIMEOUT_SECS,
            write: DEFAULT_WRITE_TIMEOUT_SECS,
            pool: DEFAULT_POOL_TIMEOUT_SECS,
        }
    }
}

impl TimeoutConfig {
    pub fn connect(&self) -> Duration {
        Duration::from_secs_f64(self.connect)
    }

    pub fn read(&self) -> Duration {
        Duration::from_secs_f64(self.read)
    }

    pub fn write(&self) -> Duration {
        Duration::from_secs_f64(self.write)
    }

    pub fn pool(&self) -> Duration {
        Duration::from_secs_f64(self.pool)
    }

    /// Upper bound on one whole request: acquire, connect, send, receive.
    pub fn request_budget(&self) -> Duration {
        self.pool() + self.connect() + self.write() + self.read()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let fields = [
            ("connect", self.connect),
            ("read", self.read),
            ("write", self.write),
            ("pool", self.pool),
        ];
        for (name, secs) in fields {
            if !secs.is_finite() || secs <= 0.0 || secs > MAX_TIMEOUT_SECS {
                return Err(UnlockError::invalid(format!(
                    "timeouts.{name} must be between 0 and {MAX_TIMEOUT_SECS} seconds, got {secs}"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Raw file shape
// ============================================================================

/// Configuration exactly as it appears on disk, before validation.
#[derive(Debug, Deserialize)]
pub(crate) struct RawConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub skip_cert_verify: bool,
    #[serde(default)]
    pub secrets: SecretsMode,
    #[serde(default)]
    pub datasets: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}
