//! Deck construction, shuffling, and the two-phase deal.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::cards_types::{Card, RANKS, SUITS};
use crate::domain::rules::{DECK_SIZE, PLAYERS};
use crate::errors::domain::{DomainError, ValidationKind};

/// The full 32-card short pack in fixed order (suits C,D,H,S; ranks 7..A).
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in SUITS {
        for rank in RANKS {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Returns a shuffled copy; the input deck is never mutated.
pub fn shuffle(deck: &[Card]) -> Vec<Card> {
    shuffle_with(deck, &mut rand::rng())
}

/// Shuffle with a caller-supplied RNG, for deterministic tests.
pub fn shuffle_with<R: Rng + ?Sized>(deck: &[Card], rng: &mut R) -> Vec<Card> {
    let mut out = deck.to_vec();
    out.shuffle(rng);
    out
}

/// Seeded shuffle helper.
pub fn shuffle_seeded(deck: &[Card], seed: u64) -> Vec<Card> {
    let mut rng = StdRng::seed_from_u64(seed);
    shuffle_with(deck, &mut rng)
}

/// First dealing phase: 3 cards then 2 to each player in round-robin order,
/// consuming from the deck front. Leaves 12 cards in the deck.
pub fn deal_initial(deck: &mut Vec<Card>) -> Result<[Vec<Card>; PLAYERS], DomainError> {
    if deck.len() != DECK_SIZE {
        return Err(DomainError::validation(
            ValidationKind::Other("DeckSize".into()),
            format!("Initial deal needs a full deck, got {}", deck.len()),
        ));
    }
    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for batch in [3usize, 2] {
        for hand in hands.iter_mut() {
            hand.extend(deck.drain(..batch));
        }
    }
    Ok(hands)
}

/// Second dealing phase after bidding: 3 more cards each, emptying the deck.
pub fn deal_remaining(
    deck: &mut Vec<Card>,
    hands: &mut [Vec<Card>; PLAYERS],
) -> Result<(), DomainError> {
    if deck.len() != PLAYERS * 3 {
        return Err(DomainError::validation(
            ValidationKind::Other("DeckSize".into()),
            format!("Second deal needs 12 cards, got {}", deck.len()),
        ));
    }
    for hand in hands.iter_mut() {
        hand.extend(deck.drain(..3));
    }
    Ok(())
}
