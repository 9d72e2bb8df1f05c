/// Shared application state
use crate::config::ServerConfig;

/// State shared across all request handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}
