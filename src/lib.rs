pub mod api;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod scheduler;
pub mod secrets;
pub mod unlock;

pub use error::{Result, UnlockError};
