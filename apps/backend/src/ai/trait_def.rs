//! Bot player trait definition.

use std::fmt;

use crate::domain::bidding::Bid;
use crate::domain::cards_types::{Card, Contract};
use crate::domain::rules::Seat;
use crate::domain::tricks::TrickPlay;
use crate::error::AppError;

/// Errors that can occur during bot decision-making.
#[derive(Debug)]
pub enum BotError {
    /// Bot encountered an internal error
    Internal(String),
    /// Bot produced an illegal move
    InvalidMove(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Internal(msg) => write!(f, "bot internal error: {msg}"),
            BotError::InvalidMove(msg) => write!(f, "bot invalid move: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<BotError> for AppError {
    fn from(err: BotError) -> Self {
        AppError::internal(format!("bot error: {err}"))
    }
}

/// The bid a bot wants to place: a contract, or pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotBid {
    Pass,
    Contract(Contract),
}

/// Trait for bot players.
///
/// Implementations see only what the seated player would see: their own
/// hand, the auction so far, and the trick in progress. They must return a
/// move that is legal for that state.
pub trait BotPlayer: Send + Sync {
    /// Choose a bid given the hand and the auction so far.
    fn choose_bid(&self, hand: &[Card], bids: &[Bid]) -> Result<BotBid, BotError>;

    /// Choose a card for the trick in progress.
    fn choose_card(
        &self,
        hand: &[Card],
        trick: &[TrickPlay],
        contract: Contract,
        seat: Seat,
    ) -> Result<Card, BotError>;
}
