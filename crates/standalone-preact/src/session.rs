//! Build orchestration for interactive front ends.
//!
//! A UI may fire a new build before the previous one has finished. Every
//! build takes a [`BuildTicket`] from the [`BuildSequencer`], and only the
//! result carrying the latest ticket is kept, so a slow stale build can never
//! overwrite a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::engine::Engine;
use crate::packager::BundleResult;
use crate::selection::{OutputFormat, Selection};

/// Sequence number of one build request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildTicket(u64);

impl BuildTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets.
#[derive(Debug, Default)]
pub struct BuildSequencer {
    latest: AtomicU64,
}

impl BuildSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued before.
    pub fn issue(&self) -> BuildTicket {
        BuildTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the most recently issued one.
    pub fn is_latest(&self, ticket: BuildTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Result of one accepted build.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    Ready(Arc<BundleResult>),
    /// User-visible message, `Error: <message>`.
    Failed(String),
}

impl BuildOutcome {
    pub fn bundle(&self) -> Option<&BundleResult> {
        match self {
            BuildOutcome::Ready(bundle) => Some(bundle),
            BuildOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            BuildOutcome::Failed(message) => Some(message),
            BuildOutcome::Ready(_) => None,
        }
    }
}

/// Snapshot of what a UI should render.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildView {
    pub selection: Selection,
    pub loading: bool,
    /// `None` until the first build settles.
    pub outcome: Option<BuildOutcome>,
}

#[derive(Debug)]
struct SessionState {
    selection: Selection,
    loading: bool,
    outcome: Option<BuildOutcome>,
}

/// One user's editing session: a mutable selection plus the latest build.
#[derive(Debug)]
pub struct BuildSession {
    engine: Arc<Engine>,
    sequencer: BuildSequencer,
    state: RwLock<SessionState>,
}

impl BuildSession {
    /// Start a session with the default selection.
    pub fn new(engine: Arc<Engine>) -> Self {
        Self::with_selection(engine, Selection::default_selection())
    }

    pub fn with_selection(engine: Arc<Engine>, selection: Selection) -> Self {
        Self {
            engine,
            sequencer: BuildSequencer::new(),
            state: RwLock::new(SessionState {
                selection,
                loading: false,
                outcome: None,
            }),
        }
    }

    pub fn toggle(&self, package: &str, export: &str, checked: bool) {
        self.state.write().selection.toggle(package, export, checked);
    }

    pub fn set_format(&self, format: OutputFormat) {
        self.state.write().selection.set_format(format);
    }

    pub fn selection(&self) -> Selection {
        self.state.read().selection.clone()
    }

    pub fn view(&self) -> BuildView {
        let state = self.state.read();
        BuildView {
            selection: state.selection.clone(),
            loading: state.loading,
            outcome: state.outcome.clone(),
        }
    }

    /// Build the current selection.
    ///
    /// Never fails: errors become a [`BuildOutcome::Failed`] message. Returns
    /// `false` when a newer rebuild started meanwhile and this result was
    /// dropped.
    pub async fn rebuild(&self) -> bool {
        let (ticket, selection) = {
            let mut state = self.state.write();
            state.loading = true;
            (self.sequencer.issue(), state.selection.clone())
        };

        let outcome = match self.engine.build(&selection).await {
            Ok(bundle) => BuildOutcome::Ready(Arc::new(bundle)),
            Err(e) => BuildOutcome::Failed(format!("Error: {}", e)),
        };

        let mut state = self.state.write();
        if !self.sequencer.is_latest(ticket) {
            tracing::debug!(ticket = ticket.sequence(), "Discarding stale build result");
            return false;
        }

        if let BuildOutcome::Failed(message) = &outcome {
            tracing::warn!(ticket = ticket.sequence(), "{}", message);
        }
        state.outcome = Some(outcome);
        state.loading = false;
        true
    }
}
