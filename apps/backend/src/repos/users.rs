//! User repository contract.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub elo: u32,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            elo: 1200,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Durable user storage. Uniqueness failures surface as
/// `ConflictKind::UniqueViolation`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: User) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn update(&self, user: User) -> Result<User, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

/// Map-backed implementation, used in tests and anywhere a relational
/// backend is not wired in.
#[derive(Default)]
pub struct InMemoryUserRepo {
    users: DashMap<Uuid, User>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn save(&self, user: User) -> Result<User, DomainError> {
        let taken = self.users.iter().any(|entry| {
            entry.id != user.id
                && (entry.email == user.email || entry.username == user.username)
        });
        if taken {
            return Err(DomainError::conflict(
                ConflictKind::UniqueViolation,
                "Email or username already registered",
            ));
        }
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.clone()))
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        if !self.users.contains_key(&user.id) {
            return Err(DomainError::not_found(NotFoundKind::User, "Unknown user"));
        }
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.users.remove(&id);
        Ok(())
    }
}
