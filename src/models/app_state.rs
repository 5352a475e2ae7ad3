use crate::models::{NodeRef, RenameOptions};

/// Number of selection roots processed before the orchestrator yields back to
/// the host's event loop.
///
/// Roots inside a batch are processed concurrently; the orchestrator suspends
/// once between batches so a very large selection never blocks the host's UI
/// thread for an unbounded stretch.
///
/// # See Also
///
/// - [`crate::services::renamer::RenameOrchestrator`] - applies the batching
pub const RENAME_BATCH_SIZE: usize = 50;

/// Outcome of the most recent rename run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    /// True when at least one node got a new name
    pub fn any_renamed(&self) -> bool {
        self.renamed > 0
    }
}

/// Single source of truth for the plugin session.
///
/// # Thread Safety
///
/// `AppState` is wrapped in `Arc<RwLock<AppState>>` by [`crate::state::StateManager`].
/// Never mutate it directly - go through
/// [`update()`](crate::state::StateManager::update) so change events are emitted.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    // Host selection (roots, in selection order)
    pub selection: Vec<NodeRef>,

    // Panel
    pub settings_open: bool,
    pub options: RenameOptions,

    // Runtime state
    pub is_renaming: bool,
    pub runs_completed: usize,
    pub last_run: Option<RunSummary>,
}

impl AppState {
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Record the end of a rename run
    pub fn finish_run(&mut self, summary: RunSummary) {
        self.is_renaming = false;
        self.runs_completed += 1;
        self.last_run = Some(summary);
    }
}
