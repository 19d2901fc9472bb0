//! Bot players used for timeout takeover of absent seats.

pub mod heuristic;
pub mod trait_def;

pub use heuristic::HeuristicBot;
pub use trait_def::{BotBid, BotError, BotPlayer};
