use std::sync::Arc;

use crate::services::{GameFlowService, MatchmakingService};
use crate::state::security_config::SecurityConfig;
use crate::store::SessionStore;
use crate::ws::hub::GameHub;

/// Shared application state injected into handlers via `web::Data`.
#[derive(Clone)]
pub struct AppState {
    store: SessionStore,
    hub: Arc<GameHub>,
    game_flow: Arc<GameFlowService>,
    matchmaking: Arc<MatchmakingService>,
    security: SecurityConfig,
}

impl AppState {
    pub fn new(
        store: SessionStore,
        hub: Arc<GameHub>,
        game_flow: Arc<GameFlowService>,
        matchmaking: Arc<MatchmakingService>,
        security: SecurityConfig,
    ) -> Self {
        Self {
            store,
            hub,
            game_flow,
            matchmaking,
            security,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn hub(&self) -> Arc<GameHub> {
        self.hub.clone()
    }

    pub fn game_flow(&self) -> Arc<GameFlowService> {
        self.game_flow.clone()
    }

    pub fn matchmaking(&self) -> Arc<MatchmakingService> {
        self.matchmaking.clone()
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.security
    }
}
