//! Trick play legality, winner resolution, and point tallying.

use serde::{Deserialize, Serialize};

use crate::domain::cards_logic::{card_beats, card_points, hand_has_suit, is_card_trump};
use crate::domain::cards_types::{Card, Contract};
use crate::domain::rules::{partner_seat, Seat, PLAYERS};
use crate::errors::domain::{DomainError, ValidationKind};

/// One card played into a trick, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickPlay {
    pub seat: Seat,
    pub card: Card,
}

/// Seat currently winning a (possibly partial) trick.
pub fn current_winner(plays: &[TrickPlay], contract: Contract) -> Option<Seat> {
    let first = plays.first()?;
    let lead = first.card.suit;
    let mut best = first;
    for play in &plays[1..] {
        if card_beats(play.card, best.card, lead, contract) {
            best = play;
        }
    }
    Some(best.seat)
}

/// Winner of a completed trick.
pub fn trick_winner(plays: &[TrickPlay], contract: Contract) -> Result<Seat, DomainError> {
    if plays.len() != PLAYERS {
        return Err(DomainError::validation_other(format!(
            "Trick must hold 4 cards, got {}",
            plays.len()
        )));
    }
    current_winner(plays, contract).ok_or_else(|| DomainError::validation_other("Empty trick"))
}

/// Sum of the contextual point values of all cards in the trick.
pub fn trick_points(plays: &[TrickPlay], contract: Contract) -> u16 {
    plays.iter().map(|p| card_points(p.card, contract)).sum()
}

/// Validate a card play against the current trick.
///
/// Enforced in order: card ownership, free lead, follow-suit obligation, the
/// trump obligation when void in the lead suit, and the overtrump obligation
/// (a trump played while the partner is not winning must beat the highest
/// trump already in the trick, when able).
pub fn validate_play(
    hand: &[Card],
    plays: &[TrickPlay],
    seat: Seat,
    card: Card,
    contract: Contract,
) -> Result<(), DomainError> {
    if !hand.contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            "Card not in hand",
        ));
    }

    let Some(first) = plays.first() else {
        return Ok(());
    };
    let lead = first.card.suit;

    if hand_has_suit(hand, lead) {
        if card.suit != lead {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                "Must follow the lead suit",
            ));
        }
        return overtrump_check(hand, plays, seat, card, contract);
    }

    // Cannot follow: must trump when holding one; the chosen trump is then
    // still subject to the overtrump obligation.
    if let Some(trump) = contract.trump_suit() {
        if card.suit != trump && hand_has_suit(hand, trump) {
            return Err(DomainError::validation(
                ValidationKind::MustPlayTrump,
                "Must play trump when void in the lead suit",
            ));
        }
    }
    overtrump_check(hand, plays, seat, card, contract)
}

fn overtrump_check(
    hand: &[Card],
    plays: &[TrickPlay],
    seat: Seat,
    card: Card,
    contract: Contract,
) -> Result<(), DomainError> {
    let Some(trump) = contract.trump_suit() else {
        return Ok(());
    };
    if card.suit != trump {
        return Ok(());
    }
    if current_winner(plays, contract) == Some(partner_seat(seat)) {
        return Ok(());
    }
    let highest_played = plays
        .iter()
        .filter(|p| is_card_trump(p.card, contract))
        .map(|p| p.card.rank.trump_order())
        .max();
    let Some(highest) = highest_played else {
        return Ok(());
    };
    if card.rank.trump_order() > highest {
        return Ok(());
    }
    let can_beat = hand
        .iter()
        .any(|c| c.suit == trump && c.rank.trump_order() > highest);
    if can_beat {
        return Err(DomainError::validation(
            ValidationKind::MustOvertrump,
            "Must play a higher trump",
        ));
    }
    Ok(())
}
