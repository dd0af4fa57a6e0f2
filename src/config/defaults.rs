/// Default configuration constants used across the system.

/// Default seconds between passes in daemon mode.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Default TCP connect timeout (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: f64 = 3.0;

/// Default response read timeout (seconds).
pub const DEFAULT_READ_TIMEOUT_SECS: f64 = 30.0;

/// Default request write timeout (seconds).
pub const DEFAULT_WRITE_TIMEOUT_SECS: f64 = 30.0;

/// Default connection-pool acquisition timeout (seconds).
pub const DEFAULT_POOL_TIMEOUT_SECS: f64 = 5.0;

/// Upper bound accepted for any single timeout (seconds).
pub const MAX_TIMEOUT_SECS: f64 = 3600.0;

/// Maximum size for a config file (1 MiB).
pub const MAX_CONFIG_FILE_BYTES: u64 = 1024 * 1024;

/// Path prefix of the appliance REST API.
pub const API_PATH_PREFIX: &str = "/api/v2.0";

/// Directory name under `~/.config` searched for a config file.
pub const CONFIG_DIR_NAME: &str = "truenas-unlock";

/// Printed when no configuration file can be found.
pub const EXAMPLE_CONFIG: &str = "\
host: 192.168.1.214:443
api_key: ~/.secrets/truenas-api-key  # file path or literal value
skip_cert_verify: true
# secrets: auto  # auto (default), files, or inline

datasets:
  tank/syncthing: ~/.secrets/syncthing-key
  tank/photos: my-literal-passphrase
";
