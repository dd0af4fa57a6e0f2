//! One unlock pass over every configured dataset.
//!
//! Datasets are handled strictly in configuration order, one at a time. A
//! dataset is only unlocked after the appliance has positively reported it as
//! locked; an unknown state is never acted on.

use crate::api::{DatasetApi, LockState, UnlockOutcome};
use crate::config::{Config, Dataset};
use crate::output::{OutputSink, UnlockEvent};
use tracing::{debug, info, warn};

/// Summary of one pass. Nothing here is carried into the next pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub checked: usize,
    pub already_unlocked: usize,
    pub unlocked: usize,
    pub failed: usize,
    pub unknown: usize,
    /// Set when the pass stopped early because the API credential was unreadable.
    pub aborted: bool,
}

/// Check every dataset and unlock the ones reported locked.
///
/// Never fails: every problem is reported to `sink` and left for the next pass.
pub async fn run_once(config: &Config, api: &dyn DatasetApi, sink: &dyn OutputSink) -> PassReport {
    let mut report = PassReport::default();

    for dataset in &config.datasets {
        let state = match api.check_locked(dataset).await {
            Ok(state) => state,
            Err(err) => {
                warn!("Aborting pass at {}: {err}", dataset.path());
                sink.emit(UnlockEvent::PassAborted {
                    reason: err.to_string(),
                });
                report.aborted = true;
                break;
            }
        };
        report.checked += 1;

        match state {
            LockState::Locked => unlock_dataset(dataset, api, sink, &mut report).await,
            LockState::Unlocked => {
                report.already_unlocked += 1;
                sink.emit(UnlockEvent::AlreadyUnlocked {
                    dataset: dataset.path().to_string(),
                });
            }
            LockState::Unknown(reason) => {
                report.unknown += 1;
                sink.emit(UnlockEvent::StateUnknown {
                    dataset: dataset.path().to_string(),
                    reason,
                });
            }
        }
    }

    info!(
        "Pass complete: {} checked, {} unlocked, {} failed, {} unknown",
        report.checked, report.unlocked, report.failed, report.unknown
    );
    report
}

async fn unlock_dataset(
    dataset: &Dataset,
    api: &dyn DatasetApi,
    sink: &dyn OutputSink,
    report: &mut PassReport,
) {
    let path = dataset.path().to_string();
    sink.emit(UnlockEvent::Unlocking {
        dataset: path.clone(),
    });

    let failure = match api.unlock(dataset).await {
        Ok(UnlockOutcome::Unlocked) => None,
        Ok(UnlockOutcome::Failed(reason)) => Some(reason),
        Err(err) => Some(err.to_string()),
    };

    match failure {
        None => {
            debug!("Unlocked {path}");
            report.unlocked += 1;
            sink.emit(UnlockEvent::Unlocked { dataset: path });
        }
        Some(reason) => {
            report.failed += 1;
            sink.emit(UnlockEvent::UnlockFailed {
                dataset: path,
                reason,
            });
        }
    }
}

/// List the configured datasets without contacting the appliance.
pub fn dry_run(config: &Config, sink: &dyn OutputSink) {
    sink.emit(UnlockEvent::DryRun {
        datasets: config
            .datasets
            .iter()
            .map(|d| d.path().to_string())
            .collect(),
    });
}

// ============================================================================
// Tests
// ============================================================================
