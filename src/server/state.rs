use std::sync::Arc;

use crate::orchestrator::Orchestrator;

/// Shared application state. A single `Orchestrator` holds every wired capability
/// port; the HTTP layer never talks to a port directly.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}
