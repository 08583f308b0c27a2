//! Shared application state for the gateway.

use std::sync::Arc;

use civica_agent::AgentClient;
use civica_common::Result;
use civica_config::Config;

/// Shared state injected into every Axum handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub agent: AgentClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let agent = AgentClient::new(&config.agent)?;
        Ok(Self { config, agent })
    }
}

pub type SharedState = Arc<AppState>;
