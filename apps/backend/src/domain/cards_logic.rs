//! Card game logic: suit checks, contract-aware ordering and point values

use super::cards_types::{Card, Contract, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Whether a card counts as trump under the given contract. Every card is
/// trump in ALL_TRUMPS and none in NO_TRUMPS.
pub fn is_card_trump(card: Card, contract: Contract) -> bool {
    match contract {
        Contract::AllTrumps => true,
        Contract::NoTrumps => false,
        _ => Some(card.suit) == contract.trump_suit(),
    }
}

/// Strength of a card within its own suit under the contract. Only
/// comparable between cards of the same suit (or two trumps).
pub fn card_order(card: Card, contract: Contract) -> u8 {
    if is_card_trump(card, contract) {
        card.rank.trump_order()
    } else {
        card.rank.plain_order()
    }
}

/// Point value of a card under the contract.
pub fn card_points(card: Card, contract: Contract) -> u16 {
    if is_card_trump(card, contract) {
        card.rank.trump_value()
    } else {
        card.rank.plain_value()
    }
}

/// Whether card `a` beats card `b` in a trick led with `lead`, under the
/// given contract.
pub fn card_beats(a: Card, b: Card, lead: Suit, contract: Contract) -> bool {
    let a_trump = is_card_trump(a, contract);
    let b_trump = is_card_trump(b, contract);
    if a_trump && !b_trump {
        return true;
    }
    if b_trump && !a_trump {
        return false;
    }
    if a_trump && b_trump {
        // In ALL_TRUMPS, trumps of different suits do not beat each other
        // unless one follows the lead.
        if a.suit != b.suit {
            return a.suit == lead;
        }
        return a.rank.trump_order() > b.rank.trump_order();
    }
    // No trump involved: only lead-suit cards can beat others
    let a_follows = a.suit == lead;
    let b_follows = b.suit == lead;
    if a_follows && !b_follows {
        return true;
    }
    if b_follows && !a_follows {
        return false;
    }
    if a_follows && b_follows {
        return a.rank.plain_order() > b.rank.plain_order();
    }
    false
}

/// The strongest trump held in `cards` under the contract, if any.
pub fn highest_trump(cards: &[Card], contract: Contract) -> Option<Card> {
    cards
        .iter()
        .copied()
        .filter(|&c| is_card_trump(c, contract))
        .max_by_key(|c| c.rank.trump_order())
}
