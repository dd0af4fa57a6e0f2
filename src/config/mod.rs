mod defaults;
mod io;
mod types;
mod validation;

pub use defaults::*;
pub use io::*;
pub use types::*;
pub use validation::*;

use crate::error::Result;
use crate::secrets::{SecretSource, SecretValue, SecretsMode};
use std::path::{Path, PathBuf};
use tracing::info;

/// Validated unlock configuration. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Config {
    /// Appliance address, `host:port` or a full `http(s)://` origin.
    pub host: String,
    /// Bearer credential, literal or file-backed.
    pub api_key: SecretSource,
    pub skip_cert_verify: bool,
    pub secrets: SecretsMode,
    /// Datasets in the order they appear in the source file.
    pub datasets: Vec<Dataset>,
    pub timeouts: TimeoutConfig,
}

impl Config {
    /// Load and validate configuration from a file.
    pub fn from_path(path: &Path) -> Result<Self> {
        info!("Loading config from {}", path.display());
        let config = Self::from_value(read_config_file(path)?)?;
        info!(
            "{} dataset(s), secrets mode {}",
            config.datasets.len(),
            config.secrets
        );
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        Self::from_value(parse_config_str(content, format)?)
    }

    /// Validate an already-parsed configuration mapping.
    pub fn from_value(mut value: serde_json::Value) -> Result<Self> {
        apply_legacy_keys(&mut value)?;
        let raw: RawConfig = serde_json::from_value(value)
            .map_err(|e| crate::error::UnlockError::invalid(e.to_string()))?;
        validate_raw(raw)
    }

    /// Resolve the API credential. Re-reads a key file on every call.
    pub fn api_key(&self) -> Result<SecretValue> {
        self.api_key.resolve(self.secrets)
    }

    /// Base URL of the appliance REST API.
    pub fn api_base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{host}{API_PATH_PREFIX}")
        } else {
            format!("https://{host}{API_PATH_PREFIX}")
        }
    }
}

/// Locate the configuration file.
///
/// An explicit path is returned only if it exists; otherwise the standard
/// locations are searched in order.
pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }
    config_search_paths().into_iter().find(|p| p.exists())
}

/// Standard configuration locations, most specific first.
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from("config.yaml"), PathBuf::from("config.yml")];

    if let Some(home) = dirs::home_dir() {
        let dir = home.join(".config").join(CONFIG_DIR_NAME);
        candidates.push(dir.join("config.yaml"));
        candidates.push(dir.join("config.yml"));
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnlockError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn paths(config: &Config) -> Vec<&str> {
        config.datasets.iter().map(|d| d.path()).collect()
    }

    #[test]
    fn config_from_yaml() {
        let dir = TempDir::new().unwrap();
        let config_file = dir.path().join("config.yaml");
        let key_file = dir.path().join("api-key");
        let ds_key = dir.path().join("ds-key");
        fs::write(&key_file, "test-api-key").unwrap();
        fs::write(&ds_key, "test-passphrase").unwrap();

        fs::write(
            &config_file,
            format!(
                "host: 192.168.1.1:443\napi_key_file: {}\nskip_cert_verify: true\n\
                 datasets:\n  tank/photos: {}\n  tank/docs: {}\n",
                key_file.display(),
                ds_key.display(),
                ds_key.display(),
            ),
        )
        .unwrap();

        let config = Config::from_path(&config_file).unwrap();
        assert_eq!(config.host, "192.168.1.1:443");
        assert!(config.skip_cert_verify);
        assert_eq!(config.secrets, SecretsMode::Auto);
        assert_eq!(config.api_key().unwrap().expose(), "test-api-key");
        assert_eq!(paths(&config), vec!["tank/photos", "tank/docs"]);
        assert_eq!(
            config.datasets[0].passphrase(config.secrets).unwrap().expose(),
            "test-passphrase"
        );
    }

    #[test]
    fn missing_api_key_file_fails_on_use() {
        let config = Config::parse(
            "host: 192.168.1.1:443\napi_key_file: /nonexistent/path\nsecrets: files\n\
             datasets:\n  tank/photos: /tmp/key\n",
            ConfigFormat::Yaml,
        )
        .unwrap();

        assert!(matches!(
            config.api_key(),
            Err(UnlockError::SecretUnreadable { .. })
        ));
    }

    #[test]
    fn legacy_and_current_key_load_identically() {
        let legacy = Config::parse(
            "host: nas:443\napi_key_file: abc\ndatasets:\n  tank/a: x\n",
            ConfigFormat::Yaml,
        )
        .unwrap();
        let current = Config::parse(
            "host: nas:443\napi_key: abc\ndatasets:\n  tank/a: x\n",
            ConfigFormat::Yaml,
        )
        .unwrap();

        assert_eq!(legacy.api_key, current.api_key);
        assert_eq!(legacy.datasets, current.datasets);
        assert_eq!(legacy.host, current.host);
    }

    #[test]
    fn dataset_order_follows_source() {
        let config = Config::parse(
            "host: nas:443\napi_key: k\ndatasets:\n  tank/z: a\n  pool2/b: b\n  tank/a: c\n",
            ConfigFormat::Yaml,
        )
        .unwrap();
        assert_eq!(paths(&config), vec!["tank/z", "pool2/b", "tank/a"]);
    }

    #[test]
    fn secrets_mode_parsed() {
        let config = Config::parse(
            "host: nas:443\napi_key: k\nsecrets: inline\ndatasets:\n  tank/a: x\n",
            ConfigFormat::Yaml,
        )
        .unwrap();
        assert_eq!(config.secrets, SecretsMode::Inline);
    }

    #[test]
    fn unknown_secrets_mode_rejected() {
        let err = Config::parse(
            "host: nas:443\napi_key: k\nsecrets: vault\ndatasets:\n  tank/a: x\n",
            ConfigFormat::Yaml,
        )
        .unwrap_err();
        assert!(matches!(err, UnlockError::ConfigInvalid(_)));
    }

    #[test]
    fn missing_api_key_rejected() {
        let err = Config::parse("host: nas:443\ndatasets:\n  tank/a: x\n", ConfigFormat::Yaml)
            .unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn missing_or_empty_host_rejected() {
        let missing =
            Config::parse("api_key: k\ndatasets:\n  tank/a: x\n", ConfigFormat::Yaml).unwrap_err();
        assert!(missing.to_string().contains("host"));

        let empty = Config::parse(
            "host: '  '\napi_key: k\ndatasets:\n  tank/a: x\n",
            ConfigFormat::Yaml,
        )
        .unwrap_err();
        assert!(empty.to_string().contains("host"));
    }

    #[test]
    fn empty_datasets_rejected() {
        let none = Config::parse("host: nas:443\napi_key: k\n", ConfigFormat::Yaml).unwrap_err();
        assert!(none.to_string().contains("dataset"));

        let empty =
            Config::parse("host: nas:443\napi_key: k\ndatasets: {}\n", ConfigFormat::Yaml)
                .unwrap_err();
        assert!(empty.to_string().contains("dataset"));
    }

    #[test]
    fn non_string_secret_rejected() {
        let err = Config::parse(
            "host: nas:443\napi_key: k\ndatasets:\n  tank/a: 1234\n",
            ConfigFormat::Yaml,
        )
        .unwrap_err();
        assert!(err.to_string().contains("tank/a"));
    }

    #[test]
    fn empty_document_rejected() {
        let err = Config::parse("", ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(err, UnlockError::ConfigInvalid(_)));
    }

    #[test]
    fn timeouts_section() {
        let config = Config::parse(
            "host: nas:443\napi_key: k\ntimeouts:\n  connect: 1.5\n  pool: 2\ndatasets:\n  tank/a: x\n",
            ConfigFormat::Yaml,
        )
        .unwrap();
        assert_eq!(config.timeouts.connect, 1.5);
        assert_eq!(config.timeouts.pool, 2.0);
        assert_eq!(config.timeouts.read, DEFAULT_READ_TIMEOUT_SECS);
    }

    #[test]
    fn api_base_url_defaults_to_https() {
        let config = Config::parse(
            "host: 192.168.1.214:443\napi_key: k\ndatasets:\n  tank/a: x\n",
            ConfigFormat::Yaml,
        )
        .unwrap();
        assert_eq!(config.api_base_url(), "https://192.168.1.214:443/api/v2.0");
    }

    #[test]
    fn api_base_url_keeps_explicit_scheme() {
        let config = Config::parse(
            "host: http://127.0.0.1:8080/\napi_key: k\ndatasets:\n  tank/a: x\n",
            ConfigFormat::Yaml,
        )
        .unwrap();
        assert_eq!(config.api_base_url(), "http://127.0.0.1:8080/api/v2.0");
    }

    #[test]
    fn find_explicit_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("custom.yaml");
        assert_eq!(find_config_file(Some(file.as_path())), None);

        fs::write(&file, "host: x").unwrap();
        assert_eq!(find_config_file(Some(file.as_path())), Some(file.clone()));
    }

    #[test]
    fn search_paths_start_in_working_dir() {
        let candidates = config_search_paths();
        assert_eq!(candidates[0], PathBuf::from("config.yaml"));
        assert_eq!(candidates[1], PathBuf::from("config.yml"));
    }
}
