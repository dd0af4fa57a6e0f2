//! Core types for secret handling.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Secrets Mode
// ============================================================================

/// How configured secret values are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretsMode {
    /// Read the value as a file when such a file exists, otherwise use it literally.
    #[default]
    Auto,
    /// Always treat the value as a file path.
    Files,
    /// Always treat the value as the secret itself.
    Inline,
}

impl SecretsMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SecretsMode::Auto => "auto",
            SecretsMode::Files => "files",
            SecretsMode::Inline => "inline",
        }
    }
}

impl fmt::Display for SecretsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Secret Value
// ============================================================================

/// A resolved secret. `Debug` and `Display` never reveal the contents.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(String);

impl SecretValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the raw secret. Callers must not log the result.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretValue({REDACTED})")
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// A secret as written in configuration: a literal or a path to a file.
///
/// The raw text may itself be the secret, so it is redacted like one.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretSource(String);

impl SecretSource {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The configured text, exactly as written.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Resolve under `mode`. Reads the filesystem on every call.
    pub fn resolve(&self, mode: SecretsMode) -> crate::error::Result<SecretValue> {
        super::resolver::resolve_secret(&self.0, mode)
    }
}

impl fmt::Debug for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretSource({REDACTED})")
    }
}

/// Display form of any secret. Says nothing about the value, not even its length.
pub const REDACTED: &str = "***";
