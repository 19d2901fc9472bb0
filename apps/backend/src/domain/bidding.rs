//! Bidding legality, completion detection, and final-contract resolution.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::cards_types::Contract;
use crate::domain::rules::{same_team, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidKind {
    Pass,
    Contract,
    Double,
    Redouble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub seat: Seat,
    pub kind: BidKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<Contract>,
    #[serde(with = "time::serde::timestamp")]
    pub at: OffsetDateTime,
}

impl Bid {
    pub fn pass(seat: Seat) -> Self {
        Self {
            seat,
            kind: BidKind::Pass,
            contract: None,
            at: OffsetDateTime::now_utc(),
        }
    }

    pub fn contract(seat: Seat, contract: Contract) -> Self {
        Self {
            seat,
            kind: BidKind::Contract,
            contract: Some(contract),
            at: OffsetDateTime::now_utc(),
        }
    }

    pub fn double(seat: Seat) -> Self {
        Self {
            seat,
            kind: BidKind::Double,
            contract: None,
            at: OffsetDateTime::now_utc(),
        }
    }

    pub fn redouble(seat: Seat) -> Self {
        Self {
            seat,
            kind: BidKind::Redouble,
            contract: None,
            at: OffsetDateTime::now_utc(),
        }
    }
}

/// The resolved outcome of a completed auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalContract {
    pub contract: Contract,
    pub holder: Seat,
    pub doubled: bool,
    pub redoubled: bool,
}

/// The last CONTRACT bid in the history, if any.
fn last_contract_bid(history: &[Bid]) -> Option<&Bid> {
    history
        .iter()
        .rev()
        .find(|b| b.kind == BidKind::Contract)
}

/// Validate a candidate bid against the auction so far.
///
/// DOUBLE may only be issued by the team opposite the current contract
/// holder, and only directly after the contract bid. REDOUBLE mirrors that
/// for the contract-holding team directly after a DOUBLE.
pub fn validate_bid(history: &[Bid], candidate: &Bid) -> Result<(), DomainError> {
    match candidate.kind {
        BidKind::Pass => Ok(()),
        BidKind::Contract => {
            let Some(contract) = candidate.contract else {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBid,
                    "Contract bid requires a contract",
                ));
            };
            match last_contract_bid(history).and_then(|b| b.contract) {
                Some(prev) if contract <= prev => Err(DomainError::validation(
                    ValidationKind::InvalidBid,
                    format!("{contract:?} does not outrank {prev:?}"),
                )),
                _ => Ok(()),
            }
        }
        BidKind::Double => match history.last() {
            Some(last) if last.kind == BidKind::Contract => {
                if same_team(last.seat, candidate.seat) {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidBid,
                        "Cannot double own team's contract",
                    ));
                }
                Ok(())
            }
            _ => Err(DomainError::validation(
                ValidationKind::InvalidBid,
                "Double must directly follow a contract bid",
            )),
        },
        BidKind::Redouble => match history.last() {
            Some(last) if last.kind == BidKind::Double => {
                if same_team(last.seat, candidate.seat) {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidBid,
                        "Redouble must come from the contract-holding team",
                    ));
                }
                Ok(())
            }
            _ => Err(DomainError::validation(
                ValidationKind::InvalidBid,
                "Redouble must directly follow a double",
            )),
        },
    }
}

pub fn is_valid_bid(history: &[Bid], candidate: &Bid) -> bool {
    validate_bid(history, candidate).is_ok()
}

/// The auction ends after four opening passes, or once three consecutive
/// passes follow the last non-pass bid.
pub fn is_bidding_complete(history: &[Bid]) -> bool {
    let trailing_passes = history
        .iter()
        .rev()
        .take_while(|b| b.kind == BidKind::Pass)
        .count();
    if trailing_passes == history.len() {
        return trailing_passes >= 4;
    }
    trailing_passes >= 3
}

/// Resolve the auction outcome. `None` means four passes: redeal.
pub fn final_contract(history: &[Bid]) -> Option<FinalContract> {
    let winning = last_contract_bid(history)?;
    let contract = winning.contract?;
    let mut doubled = false;
    let mut redoubled = false;
    for bid in history {
        match bid.kind {
            BidKind::Double => doubled = true,
            BidKind::Redouble => redoubled = true,
            // A later contract bid clears any earlier modifiers.
            BidKind::Contract => {
                doubled = false;
                redoubled = false;
            }
            BidKind::Pass => {}
        }
    }
    if redoubled {
        doubled = false;
    }
    Some(FinalContract {
        contract,
        holder: winning.seat,
        doubled,
        redoubled,
    })
}
