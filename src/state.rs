use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::agents::http::HttpDecisionProvider;
use crate::agents::DecisionProvider;
use crate::broadcast::Broadcaster;
use crate::store::GameStore;
use crate::utils::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: GameStore,
    pub net: Broadcaster,
    /// External decision capability for agent players. None leaves agents
    /// registered but idle.
    pub decisions: Option<Arc<dyn DecisionProvider>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            store: GameStore::new(),
            net: Broadcaster::new(),
            decisions: None,
            config: Arc::new(ServerConfig::default()),
        }
    }

    pub fn from_config(config: ServerConfig) -> Self {
        let decisions: Option<Arc<dyn DecisionProvider>> = match &config.decision_endpoint {
            Some(endpoint) => {
                let timeout = Duration::from_secs(config.decision_timeout_secs);
                match HttpDecisionProvider::new(endpoint.clone(), timeout) {
                    Ok(provider) => Some(Arc::new(provider)),
                    Err(e) => {
                        warn!(error = %e, "failed to build decision client, agents will idle");
                        None
                    }
                }
            }
            None => None,
        };
        AppState {
            store: GameStore::new(),
            net: Broadcaster::new(),
            decisions,
            config: Arc::new(config),
        }
    }

    pub fn with_decisions(mut self, provider: Arc<dyn DecisionProvider>) -> Self {
        self.decisions = Some(provider);
        self
    }

    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = Arc::new(config);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new()
    }
}
