use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: &'static str, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Unauthorized: {detail}")]
    Unauthorized { detail: String },
    #[error("UnauthorizedInvalidJwt")]
    UnauthorizedInvalidJwt,
    #[error("UnauthorizedExpiredJwt")]
    UnauthorizedExpiredJwt,
    #[error("Conflict: {detail}")]
    Conflict { code: &'static str, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Store unavailable: {detail}")]
    StoreUnavailable { detail: String },
}

impl AppError {
    /// Helper method to extract error code from any error variant
    pub fn code(&self) -> String {
        match self {
            AppError::Validation { code, .. } => code.to_string(),
            AppError::NotFound { code, .. } => code.to_string(),
            AppError::Unauthorized { .. } => "UNAUTHORIZED".to_string(),
            AppError::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT".to_string(),
            AppError::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT".to_string(),
            AppError::Conflict { code, .. } => code.to_string(),
            AppError::Internal { .. } => "INTERNAL".to_string(),
            AppError::Config { .. } => "CONFIG_ERROR".to_string(),
            AppError::StoreUnavailable { .. } => "STORE_UNAVAILABLE".to_string(),
        }
    }

    /// Helper method to extract error detail from any error variant
    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Unauthorized { detail } => detail.clone(),
            AppError::UnauthorizedInvalidJwt => "Invalid JWT".to_string(),
            AppError::UnauthorizedExpiredJwt => "Token expired".to_string(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Internal { detail } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
            AppError::StoreUnavailable { detail } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::UnauthorizedInvalidJwt => StatusCode::UNAUTHORIZED,
            AppError::UnauthorizedExpiredJwt => StatusCode::UNAUTHORIZED,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn invalid(code: &'static str, detail: String) -> Self {
        Self::Validation { code, detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }

    pub fn not_found(code: &'static str, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn unauthorized(detail: String) -> Self {
        Self::Unauthorized { detail }
    }

    pub fn unauthorized_invalid_jwt() -> Self {
        Self::UnauthorizedInvalidJwt
    }

    pub fn unauthorized_expired_jwt() -> Self {
        Self::UnauthorizedExpiredJwt
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn conflict(code: &'static str, detail: String) -> Self {
        Self::Conflict { code, detail }
    }

    pub fn store_unavailable(detail: String) -> Self {
        Self::StoreUnavailable { detail }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::internal(format!("env var error: {e}"))
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    crate::errors::ValidationKind::ParseCard => "PARSE_CARD",
                    crate::errors::ValidationKind::InvalidTrumpConversion => "INVALID_TRUMP",
                    crate::errors::ValidationKind::PhaseMismatch => "PHASE_MISMATCH",
                    crate::errors::ValidationKind::OutOfTurn => "OUT_OF_TURN",
                    crate::errors::ValidationKind::NotSeated => "NOT_SEATED",
                    crate::errors::ValidationKind::CardNotInHand => "CARD_NOT_IN_HAND",
                    crate::errors::ValidationKind::MustFollowSuit => "MUST_FOLLOW_SUIT",
                    crate::errors::ValidationKind::MustPlayTrump => "MUST_PLAY_TRUMP",
                    crate::errors::ValidationKind::MustOvertrump => "MUST_OVERTRUMP",
                    crate::errors::ValidationKind::InvalidBid => "INVALID_BID",
                    crate::errors::ValidationKind::InvalidDeclaration => "INVALID_DECLARATION",
                    crate::errors::ValidationKind::GameFull => "GAME_FULL",
                    _ => "VALIDATION",
                };
                AppError::invalid(code, detail)
            }
            DomainError::Unauthorized(detail) => AppError::unauthorized(detail),
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::SeatTaken => "SEAT_TAKEN",
                    ConflictKind::UniqueViolation => "UNIQUE_VIOLATION",
                    ConflictKind::OptimisticLock => "OPTIMISTIC_LOCK",
                    ConflictKind::AlreadyJoined => "ALREADY_JOINED",
                    _ => "CONFLICT",
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::User => "USER_NOT_FOUND",
                    NotFoundKind::Game => "GAME_NOT_FOUND",
                    NotFoundKind::Session => "SESSION_NOT_FOUND",
                    NotFoundKind::Hand => "HAND_NOT_FOUND",
                    _ => "NOT_FOUND",
                };
                AppError::not_found(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::StoreUnavailable | InfraErrorKind::Timeout => {
                    AppError::store_unavailable(detail)
                }
                _ => AppError::internal(detail),
            },
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let detail = self.detail();

        let problem_details = ProblemDetails {
            type_: format!("https://belote.app/errors/{}", code.to_uppercase()),
            title: Self::humanize_code(&code),
            status: status.as_u16(),
            detail,
            code,
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .json(problem_details)
    }
}
