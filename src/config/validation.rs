use super::types::{Dataset, RawConfig};
use super::Config;
use crate::error::{Result, UnlockError};
use crate::secrets::SecretSource;
use tracing::debug;

/// Older configs name the credential `api_key_file`; `api_key` wins when both are set.
pub const LEGACY_API_KEY_FIELD: &str = "api_key_file";

/// Rewrite legacy field names in place.
pub fn apply_legacy_keys(value: &mut serde_json::Value) -> Result<()> {
    let map = value
        .as_object_mut()
        .ok_or_else(|| UnlockError::invalid("configuration must be a mapping"))?;

    if let Some(legacy) = map.remove(LEGACY_API_KEY_FIELD) {
        if !map.contains_key("api_key") {
            debug!("Using legacy '{LEGACY_API_KEY_FIELD}' field as api_key");
            map.insert("api_key".to_string(), legacy);
        }
    }
    Ok(())
}

/// Turn the raw file shape into a validated [`Config`].
pub(crate) fn validate_raw(raw: RawConfig) -> Result<Config> {
    let host = raw
        .host
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .ok_or_else(|| UnlockError::invalid("host is required"))?;

    let api_key = raw
        .api_key
        .ok_or_else(|| UnlockError::invalid("api_key is required"))?;

    let entries = raw.datasets.unwrap_or_default();
    if entries.is_empty() {
        return Err(UnlockError::invalid("at least one dataset is required"));
    }

    let mut datasets = Vec::with_capacity(entries.len());
    for (path, secret) in entries {
        let secret = match secret {
            serde_json::Value::String(s) => s,
            other => {
                return Err(UnlockError::invalid(format!(
                    "datasets.{path}: secret must be a string, got {}",
                    json_type_name(&other)
                )))
            }
        };
        datasets.push(Dataset::new(path, secret)?);
    }

    raw.timeouts.validate()?;

    Ok(Config {
        host,
        api_key: SecretSource::new(api_key),
        skip_cert_verify: raw.skip_cert_verify,
        secrets: raw.secrets,
        datasets,
        timeouts: raw.timeouts,
    })
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "a mapping",
    }
}
