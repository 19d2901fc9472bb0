//! Per-round state: the auction, the trick in progress, and running totals.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use std::cmp::Ordering;

use crate::domain::bidding::{Bid, FinalContract};
use crate::domain::cards_types::{Contract, Suit};
use crate::domain::declarations::{compare_declarations, Declaration, DeclarationKind};
use crate::domain::rules::{Seat, Team, LAST_TRICK_BONUS, TRICKS_PER_ROUND};
use crate::domain::tricks::TrickPlay;
use crate::errors::domain::DomainError;

/// One hand of play, created when the game enters its dealing phase and
/// finalized when scoring completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRound {
    pub round_no: u32,
    pub dealer: Seat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<Contract>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_holder: Option<Seat>,
    pub doubled: bool,
    pub redoubled: bool,
    /// Ordered auction history.
    pub bids: Vec<Bid>,
    /// Cards played into the trick in progress, in play order.
    pub current_trick: Vec<TrickPlay>,
    /// Last completed trick, kept for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_trick: Option<Vec<TrickPlay>>,
    pub tricks_played: u8,
    pub team1_tricks_won: u8,
    pub team2_tricks_won: u8,
    pub team1_trick_points: u32,
    pub team2_trick_points: u32,
    /// Declarations disclosed this round, both teams.
    pub declarations: Vec<Declaration>,
    #[serde(with = "time::serde::timestamp")]
    pub started_at: OffsetDateTime,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub finished_at: Option<OffsetDateTime>,
}

impl GameRound {
    pub fn new(round_no: u32, dealer: Seat) -> Self {
        Self {
            round_no,
            dealer,
            contract: None,
            contract_holder: None,
            doubled: false,
            redoubled: false,
            bids: Vec::new(),
            current_trick: Vec::with_capacity(4),
            last_trick: None,
            tricks_played: 0,
            team1_tricks_won: 0,
            team2_tricks_won: 0,
            team1_trick_points: 0,
            team2_trick_points: 0,
            declarations: Vec::new(),
            started_at: OffsetDateTime::now_utc(),
            finished_at: None,
        }
    }

    /// Apply the auction outcome.
    pub fn set_contract(&mut self, outcome: FinalContract) {
        self.contract = Some(outcome.contract);
        self.contract_holder = Some(outcome.holder);
        self.doubled = outcome.doubled;
        self.redoubled = outcome.redoubled;
    }

    pub fn contract_team(&self) -> Option<Team> {
        self.contract_holder.map(Team::of_seat)
    }

    pub fn trump_suit(&self) -> Option<Suit> {
        self.contract.and_then(Contract::trump_suit)
    }

    pub fn is_last_trick(&self) -> bool {
        usize::from(self.tricks_played) + 1 == TRICKS_PER_ROUND
    }

    /// Record a resolved trick for `winner`, moving the trick in progress to
    /// `last_trick`. The final trick of the round carries a +10 bonus.
    pub fn record_trick(&mut self, winner: Seat, points: u16) -> Result<(), DomainError> {
        if self.current_trick.len() != 4 {
            return Err(DomainError::validation_other(format!(
                "Cannot resolve a trick of {} cards",
                self.current_trick.len()
            )));
        }
        let mut points = u32::from(points);
        if self.is_last_trick() {
            points += u32::from(LAST_TRICK_BONUS);
        }
        match Team::of_seat(winner) {
            Team::NorthSouth => {
                self.team1_tricks_won += 1;
                self.team1_trick_points += points;
            }
            Team::EastWest => {
                self.team2_tricks_won += 1;
                self.team2_trick_points += points;
            }
        }
        self.last_trick = Some(std::mem::take(&mut self.current_trick));
        self.tricks_played += 1;
        Ok(())
    }

    pub fn all_tricks_played(&self) -> bool {
        usize::from(self.tricks_played) == TRICKS_PER_ROUND
    }

    /// Declarations that actually score for one team: belote always counts,
    /// while sequences and squares count only for the team holding the
    /// strongest single declaration. On a full tie the earlier disclosure
    /// prevails.
    pub fn counted_declarations(&self, team: Team) -> Vec<Declaration> {
        let mut best: Option<&Declaration> = None;
        for declaration in self
            .declarations
            .iter()
            .filter(|d| d.kind != DeclarationKind::Belote)
        {
            let stronger = match best {
                Some(current) => {
                    compare_declarations(declaration, current) == Ordering::Greater
                }
                None => true,
            };
            if stronger {
                best = Some(declaration);
            }
        }
        let best_team = best.map(|d| Team::of_seat(d.seat));
        self.declarations
            .iter()
            .filter(|d| Team::of_seat(d.seat) == team)
            .filter(|d| d.kind == DeclarationKind::Belote || best_team == Some(team))
            .cloned()
            .collect()
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(OffsetDateTime::now_utc());
    }
}
