//! Domain layer: pure game logic types and helpers.

pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod declarations;
pub mod game;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod tricks;

#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_deck;
#[cfg(test)]
mod tests_game;
#[cfg(test)]
mod tests_props_tricks;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use bidding::{final_contract, is_bidding_complete, validate_bid, Bid, BidKind, FinalContract};
pub use cards_logic::{card_beats, card_points, hand_has_suit, is_card_trump};
pub use cards_types::{Card, Contract, Rank, Suit};
pub use declarations::{compare_declarations, find_declarations, Declaration, DeclarationKind};
pub use game::{Game, GamePhase, GameStatus};
pub use round::GameRound;
pub use rules::{Seat, Team};
pub use scoring::{calculate_round_score, convert_to_match_points, MatchPoints, RoundScore};
pub use snapshot::GameSession;
pub use tricks::{current_winner, trick_points, trick_winner, validate_play, TrickPlay};
