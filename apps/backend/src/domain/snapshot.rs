//! Shared session snapshot: the externally-stored projection of a game and
//! its current round. Private hands are never embedded here; they live in
//! separate per-player records so only the holder and the server ever see a
//! hand in full.

use serde::{Deserialize, Serialize};

use crate::domain::game::Game;
use crate::domain::round::GameRound;
use crate::domain::rules::{next_seat, PLAYERS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub game: Game,
    pub round: GameRound,
    /// Per-seat readiness before the match starts.
    pub ready: [bool; PLAYERS],
    /// Seats currently driven by the bot heuristic.
    pub bots: [bool; PLAYERS],
    /// Monotonic stamp, bumped on every persisted mutation. Used to detect
    /// lost updates.
    pub version: u64,
}

impl GameSession {
    pub fn new(mut game: Game) -> Self {
        game.round_no = 1;
        let round = GameRound::new(1, game.dealer);
        Self {
            game,
            round,
            ready: [false; PLAYERS],
            bots: [false; PLAYERS],
            version: 0,
        }
    }

    pub fn all_ready(&self) -> bool {
        self.ready.iter().all(|&r| r)
    }

    pub fn bump_version(&mut self) {
        self.version += 1;
    }

    /// Begin the next round: rotate the dealer, reset per-round state.
    pub fn start_next_round(&mut self) {
        self.game.next_dealer();
        self.game.round_no += 1;
        self.round = GameRound::new(self.game.round_no, self.game.dealer);
    }

    /// Redeal after four opening passes: same round number, next dealer.
    pub fn redeal(&mut self) {
        self.game.next_dealer();
        self.round = GameRound::new(self.round.round_no, self.game.dealer);
    }

    /// Seat expected to open the auction (left of the dealer).
    pub fn first_bidder(&self) -> u8 {
        next_seat(self.game.dealer)
    }
}
