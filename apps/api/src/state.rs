use std::sync::Arc;

use crate::catalog::ProfileCatalog;
use crate::optimizer::orchestrator::OptimizationOrchestrator;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Target-model profiles. Loaded once at startup, read-only afterwards.
    pub catalog: Arc<dyn ProfileCatalog>,
    pub optimizer: Arc<OptimizationOrchestrator>,
    /// Session history backend: Postgres when DATABASE_URL is set, in-memory otherwise.
    pub sessions: Arc<dyn SessionStore>,
}
