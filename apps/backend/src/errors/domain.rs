//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and transport-agnostic. Websocket handlers and
//! HTTP routes should return `Result<T, crate::error::AppError>` and convert
//! from `DomainError` using the provided `From<DomainError> for AppError`
//! implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    StoreUnavailable,
    DataCorruption,
    Other(String),
}

/// Validation kinds for rule violations surfaced to players
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    ParseCard,
    InvalidTrumpConversion,
    PhaseMismatch,
    OutOfTurn,
    NotSeated,
    CardNotInHand,
    MustFollowSuit,
    MustPlayTrump,
    MustOvertrump,
    InvalidBid,
    InvalidDeclaration,
    GameFull,
    Other(String),
}

/// Domain-level not found entities (minimal set; extend as needed)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Game,
    Session,
    Hand,
    Other(String),
}

/// Domain-level conflict kinds (extend as needed)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    SeatTaken,
    UniqueViolation,
    OptimisticLock,
    AlreadyJoined,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or game rule violation
    Validation(ValidationKind, String),
    /// Caller is not authenticated (or the token is bad)
    Unauthorized(String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Unauthorized(d) => write!(f, "unauthorized: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Unauthorized(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}

impl From<redis::RedisError> for DomainError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_timeout() {
            DomainError::infra(InfraErrorKind::Timeout, e.to_string())
        } else {
            DomainError::infra(InfraErrorKind::StoreUnavailable, e.to_string())
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::infra(InfraErrorKind::DataCorruption, e.to_string())
    }
}
