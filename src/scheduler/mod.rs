//! Repeats unlock passes on a fixed interval.

use crate::api::DatasetApi;
use crate::cancel::CancelSignal;
use crate::config::Config;
use crate::output::{OutputSink, UnlockEvent};
use crate::unlock;
use std::time::Duration;
use tracing::{debug, info};

/// How often passes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// A single pass, then return.
    Once,
    /// Pass, sleep `interval`, repeat until cancelled.
    Daemon(Duration),
}

/// Drives passes one after another on the current task.
#[derive(Debug, Clone, Copy)]
pub struct PollScheduler {
    mode: RunMode,
    dry_run: bool,
}

impl PollScheduler {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            dry_run: false,
        }
    }

    pub fn once() -> Self {
        Self::new(RunMode::Once)
    }

    pub fn daemon(interval: Duration) -> Self {
        Self::new(RunMode::Daemon(interval))
    }

    /// List datasets instead of contacting the appliance.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Only a repeating scheduler takes over Ctrl-C; a single pass keeps the default handler.
    pub fn handles_interrupt(&self) -> bool {
        matches!(self.mode, RunMode::Daemon(_))
    }

    /// Run passes until the mode says stop or `cancel` fires. Returns the number of passes.
    ///
    /// Cancellation is observed between passes and during the sleep; a pass in
    /// progress always runs to completion.
    pub async fn run(
        &self,
        config: &Config,
        api: &dyn DatasetApi,
        sink: &dyn OutputSink,
        cancel: &CancelSignal,
    ) -> usize {
        if let RunMode::Daemon(interval) = self.mode {
            info!("Polling every {interval:?}");
            sink.emit(UnlockEvent::DaemonStarted { interval });
        }

        let mut passes = 0;
        loop {
            if cancel.is_cancelled() {
                break;
            }

            if self.dry_run {
                unlock::dry_run(config, sink);
            } else {
                unlock::run_once(config, api, sink).await;
            }
            passes += 1;

            let RunMode::Daemon(interval) = self.mode else {
                return passes;
            };

            debug!("Sleeping {interval:?} before next pass");
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = cancel.cancelled() => break,
            }
        }

        info!("Scheduler stopped after {passes} pass(es)");
        sink.emit(UnlockEvent::Stopped);
        passes
    }
}
