//! Structured warning channel for recoverable locator conditions
//!
//! Nothing recorded here aborts a locate operation. The locator hands every
//! event to a [`DiagnosticsSink`] supplied by the caller; the default sink
//! forwards to `tracing`, tests use [`RecordingSink`] to capture events
//! deterministically.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

/// A recoverable condition noticed while locating bundles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorEvent {
    /// Several installed packages share a name; only `kept` is used
    DuplicatePackage { name: String, kept: PathBuf },

    /// Two bundles in the tree share a name; lookups by name return `kept`
    DuplicateBundle {
        name: String,
        kept: PathBuf,
        ignored: PathBuf,
    },

    /// The ruleset a bundle asked for could not be resolved
    RulesetNotFound { bundle: String, ruleset: String },

    /// A rulesets file exists but could not be loaded
    RulesetInvalid { path: PathBuf, reason: String },
}

impl fmt::Display for LocatorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorEvent::DuplicatePackage { name, kept } => write!(
                f,
                "multiple \"{name}\" packages found, using {}",
                kept.display()
            ),
            LocatorEvent::DuplicateBundle {
                name,
                kept,
                ignored,
            } => write!(
                f,
                "multiple \"{name}\" bundles found, using {} and ignoring {} for lookups",
                kept.display(),
                ignored.display()
            ),
            LocatorEvent::RulesetNotFound { bundle, ruleset } => write!(
                f,
                "ruleset \"{ruleset}\" not found for bundle \"{bundle}\", no resources classified"
            ),
            LocatorEvent::RulesetInvalid { path, reason } => {
                write!(f, "ignoring rulesets file {}: {reason}", path.display())
            }
        }
    }
}

/// Receiver of locator events
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: LocatorEvent);
}

/// Forwards events to `tracing` at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: LocatorEvent) {
        tracing::warn!(target: "bundle_locator", "{event}");
    }
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn record(&self, _event: LocatorEvent) {}
}

/// Keeps every event in memory, in the order recorded
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<LocatorEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<LocatorEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Recorded events rendered as messages
    pub fn messages(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn record(&self, event: LocatorEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
