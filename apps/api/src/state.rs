use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: Config,
}
