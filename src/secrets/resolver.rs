//! Turns configured secret values into the secrets themselves.

use super::types::{SecretValue, SecretsMode};
use crate::error::{Result, UnlockError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a configured secret value under `mode`.
///
/// Nothing is cached: a file-backed secret is re-read on every call.
pub fn resolve_secret(value: &str, mode: SecretsMode) -> Result<SecretValue> {
    match mode {
        SecretsMode::Inline => Ok(resolve_inline(value)),
        SecretsMode::Files => resolve_file(value),
        SecretsMode::Auto => resolve_auto(value),
    }
}

fn resolve_inline(value: &str) -> SecretValue {
    SecretValue::new(value)
}

fn resolve_file(value: &str) -> Result<SecretValue> {
    read_secret_file(&expand_home(value))
}

// A literal that happens to name an existing file is read as that file.
fn resolve_auto(value: &str) -> Result<SecretValue> {
    let path = expand_home(value);
    if path.is_file() {
        read_secret_file(&path)
    } else {
        Ok(SecretValue::new(value))
    }
}

fn read_secret_file(path: &Path) -> Result<SecretValue> {
    debug!("Reading secret from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| UnlockError::SecretUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SecretValue::new(content.trim()))
}

/// Expand a leading `~` to the current user's home directory.
///
/// Only `~` and `~/...` are expanded. `~user/...` names another user's home and
/// is left as a literal path.
pub fn expand_home(value: &str) -> PathBuf {
    let rest = if value == "~" {
        Some("")
    } else {
        value.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(value),
    }
}
