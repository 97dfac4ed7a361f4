use std::sync::Arc;

use surveydesk_core::gate::PasswordGate;
use surveydesk_db::store::ResponseStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Where survey responses are read from and appended to.
    pub store: Arc<dyn ResponseStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn ResponseStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn gate(&self) -> PasswordGate {
        PasswordGate::new(self.config.dashboard_password.as_str())
    }
}
