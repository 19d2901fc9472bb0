//! ELO-banded matchmaking over the Redis queue.
//!
//! Players enqueue with their current rating; whenever four queued players
//! fall within a shared rating window a game is created for them and they
//! are removed from the queue.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::rules::PLAYERS;
use crate::domain::snapshot::GameSession;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::users::UserRepository;
use crate::services::game_flow::GameFlowService;
use crate::store::SessionStore;
use crate::ws::protocol::ServerMsg;

/// Half-width of the acceptable rating band around the joining player.
const ELO_WINDOW: u32 = 200;

pub struct MatchmakingService {
    store: SessionStore,
    users: Arc<dyn UserRepository>,
    game_flow: Arc<GameFlowService>,
}

impl MatchmakingService {
    pub fn new(
        store: SessionStore,
        users: Arc<dyn UserRepository>,
        game_flow: Arc<GameFlowService>,
    ) -> Self {
        Self {
            store,
            users,
            game_flow,
        }
    }

    /// Queue a player and attempt to form a table around their rating.
    /// Returns the created session when the queue yielded a full table.
    pub async fn enqueue(&self, user_id: Uuid) -> Result<Option<GameSession>, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "Unknown user"))?;
        self.store.enqueue_for_match(user_id, user.elo).await?;
        info!(%user_id, elo = user.elo, "player queued for matchmaking");
        self.try_form_match(user.elo).await
    }

    pub async fn leave(&self, user_id: Uuid) -> Result<(), AppError> {
        self.store.dequeue_from_match(user_id).await?;
        Ok(())
    }

    async fn try_form_match(&self, around_elo: u32) -> Result<Option<GameSession>, AppError> {
        let min_elo = around_elo.saturating_sub(ELO_WINDOW);
        let max_elo = around_elo.saturating_add(ELO_WINDOW);
        let candidates = self
            .store
            .match_candidates(min_elo, max_elo, PLAYERS)
            .await?;
        if candidates.len() < PLAYERS {
            return Ok(None);
        }

        let mut players = [Uuid::nil(); PLAYERS];
        players.copy_from_slice(&candidates[..PLAYERS]);
        for player in players {
            self.store.dequeue_from_match(player).await?;
        }

        let session = self.game_flow.create_game(players).await?;
        let hub = self.game_flow.hub();
        for (seat, player) in players.iter().enumerate() {
            hub.send_to(
                *player,
                ServerMsg::MatchFound {
                    game_id: session.game.id,
                    seat: seat as u8,
                },
            );
        }
        info!(game_id = %session.game.id, ?players, "match formed");
        Ok(Some(session))
    }
}
