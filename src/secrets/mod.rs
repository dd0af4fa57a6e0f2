//! Secret resolution for the API credential and dataset passphrases.
//!
//! Every configured secret is either a literal value or a path to a file holding
//! one. The process-wide [`SecretsMode`] decides how a value is interpreted.
//! Resolution happens at call time and is never cached, so replacing a key file
//! on disk takes effect on the next request.

pub mod resolver;
pub mod types;

pub use resolver::{expand_home, resolve_secret};
pub use types::{SecretSource, SecretValue, SecretsMode, REDACTED};
