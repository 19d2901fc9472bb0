//! Redis-backed session store.
//!
//! The shared snapshot lives under `game:{id}:state`, each private hand
//! under `game:{id}:hand:{player}`, both with a TTL. The matchmaking queue
//! is a sorted set scored by ELO. The store is constructed once at startup
//! and injected wherever session state is needed.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use uuid::Uuid;

use crate::domain::cards_types::Card;
use crate::domain::snapshot::GameSession;
use crate::error::AppError;
use crate::errors::domain::DomainError;

const SESSION_TTL_SECS: u64 = 3600;
const HAND_TTL_SECS: u64 = 3600;
const MATCHMAKING_KEY: &str = "matchmaking:queue";

#[derive(Clone)]
pub struct SessionStore {
    conn: ConnectionManager,
}

fn session_key(game_id: Uuid) -> String {
    format!("game:{game_id}:state")
}

fn hand_key(game_id: Uuid, player: Uuid) -> String {
    format!("game:{game_id}:hand:{player}")
}

fn deck_key(game_id: Uuid) -> String {
    format!("game:{game_id}:deck")
}

impl SessionStore {
    /// Open the store connection. Called once at startup; dropping the last
    /// clone closes the underlying connection.
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url)
            .map_err(|err| AppError::config(format!("Invalid REDIS_URL: {err}")))?;
        let conn = ConnectionManager::new(client).await.map_err(|err| {
            AppError::store_unavailable(format!("Unable to connect to Redis: {err}"))
        })?;
        Ok(Self { conn })
    }

    /// Round-trip a PING, used by the health endpoint.
    pub async fn ping(&self) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING").query_async::<()>(&mut conn).await?;
        Ok(())
    }

    pub async fn get_session(&self, game_id: Uuid) -> Result<Option<GameSession>, DomainError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(session_key(game_id)).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn put_session(&self, session: &GameSession) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(session)?;
        conn.set_ex::<_, _, ()>(session_key(session.game.id), json, SESSION_TTL_SECS)
            .await?;
        Ok(())
    }

    pub async fn delete_session(&self, game_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(session_key(game_id)).await?;
        Ok(())
    }

    pub async fn get_hand(
        &self,
        game_id: Uuid,
        player: Uuid,
    ) -> Result<Option<Vec<Card>>, DomainError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(hand_key(game_id, player)).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn put_hand(
        &self,
        game_id: Uuid,
        player: Uuid,
        hand: &[Card],
    ) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(hand)?;
        conn.set_ex::<_, _, ()>(hand_key(game_id, player), json, HAND_TTL_SECS)
            .await?;
        Ok(())
    }

    /// Atomically persist the snapshot together with one player's hand
    /// (MULTI/EXEC). Card plays go through this so a failed write leaves
    /// both records untouched; a card never leaves a stored hand without
    /// the trick that consumed it being committed too.
    pub async fn put_session_with_hand(
        &self,
        session: &GameSession,
        player: Uuid,
        hand: &[Card],
    ) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let session_json = serde_json::to_string(session)?;
        let hand_json = serde_json::to_string(hand)?;
        redis::pipe()
            .atomic()
            .set_ex(session_key(session.game.id), session_json, SESSION_TTL_SECS)
            .ignore()
            .set_ex(hand_key(session.game.id, player), hand_json, HAND_TTL_SECS)
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    pub async fn remove_hand(&self, game_id: Uuid, player: Uuid) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(hand_key(game_id, player)).await?;
        Ok(())
    }

    /// The undealt remainder of the deck between the two dealing phases.
    /// Kept out of the shared snapshot for the same reason hands are.
    pub async fn get_deck(&self, game_id: Uuid) -> Result<Option<Vec<Card>>, DomainError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(deck_key(game_id)).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn put_deck(&self, game_id: Uuid, deck: &[Card]) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(deck)?;
        conn.set_ex::<_, _, ()>(deck_key(game_id), json, HAND_TTL_SECS)
            .await?;
        Ok(())
    }

    pub async fn remove_deck(&self, game_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(deck_key(game_id)).await?;
        Ok(())
    }

    /// Add a player to the matchmaking queue, scored by ELO.
    pub async fn enqueue_for_match(&self, player: Uuid, elo: u32) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.zadd::<_, _, _, ()>(MATCHMAKING_KEY, player.to_string(), elo)
            .await?;
        Ok(())
    }

    pub async fn dequeue_from_match(&self, player: Uuid) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.zrem::<_, _, ()>(MATCHMAKING_KEY, player.to_string())
            .await?;
        Ok(())
    }

    /// Queued players within an ELO band, closest-scored first, capped at
    /// `limit`.
    pub async fn match_candidates(
        &self,
        min_elo: u32,
        max_elo: u32,
        limit: usize,
    ) -> Result<Vec<Uuid>, DomainError> {
        let mut conn = self.conn.clone();
        let members: Vec<String> = conn
            .zrangebyscore_limit(MATCHMAKING_KEY, min_elo, max_elo, 0, limit as isize)
            .await?;
        Ok(members
            .iter()
            .filter_map(|m| Uuid::parse_str(m).ok())
            .collect())
    }
}
