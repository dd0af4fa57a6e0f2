mod client;
mod types;

pub use client::TrueNasClient;
pub use types::*;

use crate::config::Dataset;
use crate::error::Result;
use async_trait::async_trait;

// ============================================================================
// Appliance contract
// ============================================================================

/// Lock state of a dataset as reported by the appliance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
    /// The state could not be confirmed; the reason is for display only.
    Unknown(String),
}

impl LockState {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockState::Locked)
    }
}

/// Result of a single unlock request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockOutcome {
    Unlocked,
    Failed(String),
}

impl UnlockOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UnlockOutcome::Unlocked)
    }
}

/// The two appliance operations the orchestrator relies on.
///
/// Transport and HTTP failures are folded into [`LockState::Unknown`] and
/// [`UnlockOutcome::Failed`]. An `Err` means a secret needed for the request
/// could not be resolved.
#[async_trait]
pub trait DatasetApi: Send + Sync {
    /// Query whether `dataset` is currently locked.
    async fn check_locked(&self, dataset: &Dataset) -> Result<LockState>;

    /// Ask the appliance to unlock `dataset` with its configured passphrase.
    async fn unlock(&self, dataset: &Dataset) -> Result<UnlockOutcome>;
}
