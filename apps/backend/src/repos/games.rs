//! Game repository contract for finished-game persistence.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::game::{Game, GameStatus};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn save(&self, game: Game) -> Result<Game, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Game>, DomainError>;
    async fn find_by_player(&self, player: Uuid) -> Result<Vec<Game>, DomainError>;
    async fn find_by_status(&self, status: GameStatus) -> Result<Vec<Game>, DomainError>;
    async fn update(&self, game: Game) -> Result<Game, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

/// Map-backed implementation, used in tests and anywhere a relational
/// backend is not wired in.
#[derive(Default)]
pub struct InMemoryGameRepo {
    games: DashMap<Uuid, Game>,
}

impl InMemoryGameRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepo {
    async fn save(&self, game: Game) -> Result<Game, DomainError> {
        if self.games.contains_key(&game.id) {
            return Err(DomainError::conflict(
                ConflictKind::UniqueViolation,
                "Game id already saved",
            ));
        }
        self.games.insert(game.id, game.clone());
        Ok(game)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Game>, DomainError> {
        Ok(self.games.get(&id).map(|g| g.clone()))
    }

    async fn find_by_player(&self, player: Uuid) -> Result<Vec<Game>, DomainError> {
        Ok(self
            .games
            .iter()
            .filter(|g| g.players.contains(&player))
            .map(|g| g.clone())
            .collect())
    }

    async fn find_by_status(&self, status: GameStatus) -> Result<Vec<Game>, DomainError> {
        Ok(self
            .games
            .iter()
            .filter(|g| g.status == status)
            .map(|g| g.clone())
            .collect())
    }

    async fn update(&self, game: Game) -> Result<Game, DomainError> {
        if !self.games.contains_key(&game.id) {
            return Err(DomainError::not_found(NotFoundKind::Game, "Unknown game"));
        }
        self.games.insert(game.id, game.clone());
        Ok(game)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.games.remove(&id);
        Ok(())
    }
}
