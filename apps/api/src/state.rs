use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Suggestion backend. `PgCatalog` in production, in-memory in tests.
    pub catalog: Arc<dyn Catalog>,
}
