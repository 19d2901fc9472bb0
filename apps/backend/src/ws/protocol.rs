//! Wire protocol for the game websocket.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::bidding::BidKind;
use crate::domain::cards_types::{Card, Contract};
use crate::domain::declarations::DeclarationKind;
use crate::domain::rules::{Seat, Team};
use crate::domain::scoring::RoundScore;

/// Client-to-server intents. Everything except `authenticate` requires a
/// previously authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Authenticate {
        token: String,
    },
    JoinGame {
        game_id: Uuid,
    },
    Ready {
        game_id: Uuid,
    },
    PlaceBid {
        game_id: Uuid,
        bid_type: BidKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        contract: Option<Contract>,
    },
    PlayCard {
        game_id: Uuid,
        card: Card,
    },
    Declare {
        game_id: Uuid,
        declaration: DeclarationKind,
    },
    FindMatch,
    CancelMatch,
}

/// Server-to-client events, broadcast to a game room or unicast to one
/// player's connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    Authenticated {
        user_id: Uuid,
        username: String,
    },
    AuthError {
        message: String,
    },
    PlayerJoined {
        game_id: Uuid,
        user_id: Uuid,
        seat: Seat,
    },
    PlayerReady {
        game_id: Uuid,
        seat: Seat,
    },
    /// Private: the recipient's own cards after a dealing phase.
    CardsDealt {
        game_id: Uuid,
        cards: Vec<Card>,
    },
    BidPlaced {
        game_id: Uuid,
        seat: Seat,
        bid_type: BidKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        contract: Option<Contract>,
    },
    /// `contract: None` means four passes: the hand is redealt.
    BiddingComplete {
        game_id: Uuid,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        contract: Option<Contract>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        holder: Option<Seat>,
        doubled: bool,
        redoubled: bool,
    },
    CardPlayed {
        game_id: Uuid,
        seat: Seat,
        card: Card,
    },
    TrickComplete {
        game_id: Uuid,
        winner: Seat,
        points: u16,
    },
    DeclarationMade {
        game_id: Uuid,
        seat: Seat,
        declaration: DeclarationKind,
        points: u16,
    },
    YourTurn {
        game_id: Uuid,
        seat: Seat,
    },
    RoundComplete {
        game_id: Uuid,
        score: RoundScore,
        team1_match_points: u32,
        team2_match_points: u32,
    },
    GameComplete {
        game_id: Uuid,
        winning_team: Team,
    },
    BotTakeover {
        game_id: Uuid,
        seat: Seat,
    },
    /// Matchmaking found a table for the recipient.
    MatchFound {
        game_id: Uuid,
        seat: Seat,
    },
    Error {
        code: String,
        message: String,
    },
}
