//! Game aggregate: lifecycle status, phase machine, rotation, match points.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::rules::{next_seat, Seat, Team, MATCH_POINTS_TO_WIN, PLAYERS};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Waiting,
    Active,
    Completed,
    Cancelled,
}

/// Round progression phases, strictly ordered within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Dealing,
    Bidding,
    Declaring,
    Playing,
    Scoring,
    Finished,
}

impl GamePhase {
    /// Legal phase transitions. BIDDING may fall back to DEALING (four-pass
    /// redeal) and SCORING loops back to DEALING for the next round.
    fn can_transition_to(self, next: GamePhase) -> bool {
        matches!(
            (self, next),
            (GamePhase::Dealing, GamePhase::Bidding)
                | (GamePhase::Bidding, GamePhase::Declaring)
                | (GamePhase::Bidding, GamePhase::Dealing)
                | (GamePhase::Declaring, GamePhase::Playing)
                | (GamePhase::Playing, GamePhase::Scoring)
                | (GamePhase::Scoring, GamePhase::Dealing)
                | (GamePhase::Scoring, GamePhase::Finished)
        )
    }
}

/// A match between two fixed teams. Seats 0 and 2 form team one, seats 1
/// and 3 team two. Terminal once either team reaches the match-point
/// target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    /// Player identities by seat.
    pub players: [Uuid; PLAYERS],
    pub status: GameStatus,
    pub phase: GamePhase,
    pub dealer: Seat,
    pub current_player: Seat,
    pub round_no: u32,
    pub team1_match_points: u32,
    pub team2_match_points: u32,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub started_at: Option<OffsetDateTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub finished_at: Option<OffsetDateTime>,
}

impl Game {
    pub fn new(id: Uuid, players: [Uuid; PLAYERS]) -> Self {
        Self {
            id,
            players,
            status: GameStatus::Waiting,
            phase: GamePhase::Dealing,
            dealer: 0,
            current_player: 1,
            round_no: 0,
            team1_match_points: 0,
            team2_match_points: 0,
            created_at: OffsetDateTime::now_utc(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn start(&mut self) -> Result<(), DomainError> {
        if self.status != GameStatus::Waiting {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Cannot start a {:?} game", self.status),
            ));
        }
        self.status = GameStatus::Active;
        self.started_at = Some(OffsetDateTime::now_utc());
        Ok(())
    }

    pub fn finish(&mut self) -> Result<(), DomainError> {
        if self.status == GameStatus::Completed {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Game already completed",
            ));
        }
        self.status = GameStatus::Completed;
        self.phase = GamePhase::Finished;
        self.finished_at = Some(OffsetDateTime::now_utc());
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if matches!(self.status, GameStatus::Completed | GameStatus::Cancelled) {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Cannot cancel a {:?} game", self.status),
            ));
        }
        self.status = GameStatus::Cancelled;
        self.finished_at = Some(OffsetDateTime::now_utc());
        Ok(())
    }

    pub fn transition_to(&mut self, next: GamePhase) -> Result<(), DomainError> {
        if !self.phase.can_transition_to(next) {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Illegal phase transition {:?} -> {next:?}", self.phase),
            ));
        }
        self.phase = next;
        Ok(())
    }

    /// Rotate the acting player one seat clockwise.
    pub fn next_player(&mut self) {
        self.current_player = next_seat(self.current_player);
    }

    /// Rotate the dealer; the first to act is the dealer's left-hand
    /// neighbour.
    pub fn next_dealer(&mut self) {
        self.dealer = next_seat(self.dealer);
        self.current_player = next_seat(self.dealer);
    }

    pub fn add_match_points(&mut self, team: Team, points: u32) {
        match team {
            Team::NorthSouth => self.team1_match_points += points,
            Team::EastWest => self.team2_match_points += points,
        }
    }

    pub fn match_points(&self, team: Team) -> u32 {
        match team {
            Team::NorthSouth => self.team1_match_points,
            Team::EastWest => self.team2_match_points,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.team1_match_points >= MATCH_POINTS_TO_WIN
            || self.team2_match_points >= MATCH_POINTS_TO_WIN
    }

    /// The winning team once the threshold is crossed. If a single round's
    /// swing pushes both teams over, the higher total wins.
    pub fn winning_team(&self) -> Option<Team> {
        if !self.is_finished() {
            return None;
        }
        if self.team1_match_points >= self.team2_match_points {
            Some(Team::NorthSouth)
        } else {
            Some(Team::EastWest)
        }
    }

    pub fn seat_of(&self, player: Uuid) -> Option<Seat> {
        self.players
            .iter()
            .position(|&p| p == player)
            .map(|i| i as Seat)
    }

    pub fn player_at(&self, seat: Seat) -> Uuid {
        self.players[usize::from(seat) % PLAYERS]
    }

    pub fn player_team(&self, player: Uuid) -> Option<Team> {
        self.seat_of(player).map(Team::of_seat)
    }
}
