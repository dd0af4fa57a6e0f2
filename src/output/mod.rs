//! User-facing output.
//!
//! The orchestrator and scheduler never print directly; they emit
//! [`UnlockEvent`]s into an [`OutputSink`] handed to them by the caller.
//! Diagnostics go through `tracing` instead.

use parking_lot::Mutex;
use std::path::PathBuf;
use std::time::Duration;

/// Something the operator should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockEvent {
    ConfigLoaded { path: PathBuf },
    DaemonStarted { interval: Duration },
    /// Dry run: the datasets that would be checked, in order.
    DryRun { datasets: Vec<String> },
    AlreadyUnlocked { dataset: String },
    Unlocking { dataset: String },
    Unlocked { dataset: String },
    UnlockFailed { dataset: String, reason: String },
    StateUnknown { dataset: String, reason: String },
    /// The rest of the pass was skipped, usually because the credential is unreadable.
    PassAborted { reason: String },
    Stopped,
}

impl UnlockEvent {
    /// Warnings go to stderr, everything else to stdout.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            UnlockEvent::UnlockFailed { .. }
                | UnlockEvent::StateUnknown { .. }
                | UnlockEvent::PassAborted { .. }
        )
    }

    /// Render as a single console line (or block, for dry runs).
    pub fn render(&self) -> String {
        match self {
            UnlockEvent::ConfigLoaded { path } => path.display().to_string(),
            UnlockEvent::DaemonStarted { interval } => {
                format!("Running every {}s", interval.as_secs())
            }
            UnlockEvent::DryRun { datasets } => {
                let mut out = String::from("Dry run:");
                for path in datasets {
                    out.push_str("\n  • ");
                    out.push_str(path);
                }
                out
            }
            UnlockEvent::AlreadyUnlocked { dataset } => format!("✓ {dataset}"),
            UnlockEvent::Unlocking { dataset } => format!("⚡ {dataset} locked, unlocking..."),
            UnlockEvent::Unlocked { dataset } => format!("→ Unlocked {dataset}"),
            UnlockEvent::UnlockFailed { dataset, reason } => {
                format!("✗ Failed to unlock {dataset}: {reason}")
            }
            UnlockEvent::StateUnknown { dataset, reason } => {
                format!("? {dataset}: lock state unknown ({reason})")
            }
            UnlockEvent::PassAborted { reason } => format!("Pass aborted: {reason}"),
            UnlockEvent::Stopped => "Stopped".to_string(),
        }
    }
}

/// Destination for [`UnlockEvent`]s.
pub trait OutputSink: Send + Sync {
    fn emit(&self, event: UnlockEvent);
}

/// Prints events to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn emit(&self, event: UnlockEvent) {
        if event.is_warning() {
            eprintln!("{}", event.render());
        } else {
            println!("{}", event.render());
        }
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<UnlockEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<UnlockEvent> {
        self.events.lock().clone()
    }
}

impl OutputSink for RecordingSink {
    fn emit(&self, event: UnlockEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_dry_run() {
        let event = UnlockEvent::DryRun {
            datasets: vec!["tank/a".into(), "tank/b".into()],
        };
        assert_eq!(event.render(), "Dry run:\n  • tank/a\n  • tank/b");
    }

    #[test]
    fn render_unlock_flow() {
        let dataset = "tank/photos".to_string();
        assert_eq!(
            UnlockEvent::Unlocking { dataset: dataset.clone() }.render(),
            "⚡ tank/photos locked, unlocking..."
        );
        assert_eq!(
            UnlockEvent::Unlocked { dataset: dataset.clone() }.render(),
            "→ Unlocked tank/photos"
        );
        assert_eq!(
            UnlockEvent::AlreadyUnlocked { dataset }.render(),
            "✓ tank/photos"
        );
    }

    #[test]
    fn render_daemon_start() {
        let event = UnlockEvent::DaemonStarted {
            interval: Duration::from_secs(10),
        };
        assert_eq!(event.render(), "Running every 10s");
    }

    #[test]
    fn warnings_classified() {
        assert!(UnlockEvent::PassAborted { reason: "x".into() }.is_warning());
        assert!(UnlockEvent::StateUnknown {
            dataset: "tank/a".into(),
            reason: "API error 500".into()
        }
        .is_warning());
        assert!(!UnlockEvent::Stopped.is_warning());
        assert!(!UnlockEvent::Unlocked { dataset: "tank/a".into() }.is_warning());
    }

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.emit(UnlockEvent::Unlocking { dataset: "tank/a".into() });
        sink.emit(UnlockEvent::Unlocked { dataset: "tank/a".into() });

        assert_eq!(
            sink.events(),
            vec![
                UnlockEvent::Unlocking { dataset: "tank/a".into() },
                UnlockEvent::Unlocked { dataset: "tank/a".into() },
            ]
        );
    }
}
