//! Repository contracts for durable storage of users and finished games.

pub mod games;
pub mod users;

pub use games::{GameRepository, InMemoryGameRepo};
pub use users::{InMemoryUserRepo, User, UserRepository};
