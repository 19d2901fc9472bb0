//! Cancellable per-turn timers.
//!
//! One timer is armed per game whenever a seat is told it is their turn.
//! Arming a new timer cancels the previous one; the timer fires only if the
//! seat fails to act within the timeout, at which point the orchestrator
//! takes the turn over with the bot heuristic.

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Default)]
pub struct TurnTimers {
    tokens: DashMap<Uuid, CancellationToken>,
}

impl TurnTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a fresh token for this game, cancelling any previous one.
    pub fn arm(&self, game_id: Uuid) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.tokens.insert(game_id, token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Cancel the timer for this game (the expected action arrived).
    pub fn disarm(&self, game_id: Uuid) {
        if let Some((_, token)) = self.tokens.remove(&game_id) {
            token.cancel();
        }
    }
}

impl Drop for TurnTimers {
    fn drop(&mut self) {
        for entry in self.tokens.iter() {
            entry.value().cancel();
        }
    }
}
