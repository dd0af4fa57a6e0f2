use super::defaults::MAX_CONFIG_FILE_BYTES;
use crate::error::{Result, UnlockError};
use std::path::Path;

/// On-disk syntax of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from the file extension. Unknown extensions are read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") | Some("json5") => ConfigFormat::Json,
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Parse configuration text into an order-preserving JSON value.
pub fn parse_config_str(content: &str, format: ConfigFormat) -> Result<serde_json::Value> {
    let value: serde_json::Value = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| UnlockError::invalid(format!("malformed YAML: {e}")))?,
        ConfigFormat::Toml => toml::from_str(content)
            .map_err(|e| UnlockError::invalid(format!("malformed TOML: {e}")))?,
        ConfigFormat::Json => json5::from_str(content).or_else(|_| {
            serde_json::from_str(content)
                .map_err(|e| UnlockError::invalid(format!("malformed JSON: {e}")))
        })?,
    };
    Ok(value)
}

/// Read a configuration file with a size guardrail.
pub fn read_config_file(path: &Path) -> Result<serde_json::Value> {
    let read_err = |source| UnlockError::ConfigRead {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path).map_err(read_err)?;
    if !metadata.is_file() {
        return Err(UnlockError::invalid(format!(
            "config path '{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > MAX_CONFIG_FILE_BYTES {
        return Err(UnlockError::invalid(format!(
            "config file '{}' is {} bytes, exceeds limit of {} bytes",
            path.display(),
            metadata.len(),
            MAX_CONFIG_FILE_BYTES,
        )));
    }

    let content = std::fs::read_to_string(path).map_err(read_err)?;
    parse_config_str(&content, ConfigFormat::from_path(path))
}

// ============================================================================
// Tests
// ============================================================================
