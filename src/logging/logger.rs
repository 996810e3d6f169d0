//! Console logger with end-of-run summary collection.
use std::sync::Mutex;

use super::types::{DefinitionEntry, DefinitionStatus, Log};

/// Console logger that also collects per-definition statuses.
///
/// Display output goes through the [`tracing`] subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber); the collected
/// entries feed the end-of-run summary.
#[derive(Debug, Default)]
pub struct Logger {
    entries: Mutex<Vec<DefinitionEntry>>,
}

impl Logger {
    /// Create a new logger with no recorded definitions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a clone of all recorded definition entries.
    #[must_use]
    pub fn entries(&self) -> Vec<DefinitionEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Count the definitions that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|e| e.status == DefinitionStatus::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded definitions.
    ///
    /// Prints nothing when no definitions were recorded (e.g. the config was
    /// just created).
    pub fn print_summary(&self) {
        let entries = match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if entries.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        let mut ok = 0u32;
        let mut skipped = 0u32;
        let mut failed = 0u32;

        for entry in &entries {
            let (icon, color) = match entry.status {
                DefinitionStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                DefinitionStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                DefinitionStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", entry.repository));
        }

        println!();
        let total = ok + skipped + failed;
        self.info(&format!(
            "{total} definitions: \x1b[32m{ok} ok\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: "deployer::stage", "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn record_definition(
        &self,
        repository: &str,
        status: DefinitionStatus,
        message: Option<&str>,
    ) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(DefinitionEntry {
                repository: repository.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}
