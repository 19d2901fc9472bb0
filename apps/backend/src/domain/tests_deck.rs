use std::collections::HashSet;

use crate::domain::cards_types::{RANKS, SUITS};
use crate::domain::deck::{create_deck, deal_initial, deal_remaining, shuffle_seeded};

#[test]
fn deck_has_32_unique_cards() {
    let deck = create_deck();
    assert_eq!(deck.len(), 32);
    let unique: HashSet<_> = deck.iter().collect();
    assert_eq!(unique.len(), 32);
    for suit in SUITS {
        assert_eq!(deck.iter().filter(|c| c.suit == suit).count(), 8);
    }
    for rank in RANKS {
        assert_eq!(deck.iter().filter(|c| c.rank == rank).count(), 4);
    }
}

#[test]
fn shuffle_is_a_permutation_and_does_not_mutate() {
    let deck = create_deck();
    let before = deck.clone();
    let shuffled = shuffle_seeded(&deck, 42);
    assert_eq!(deck, before);
    assert_eq!(shuffled.len(), deck.len());
    let mut a = deck.clone();
    let mut b = shuffled.clone();
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

#[test]
fn shuffle_is_deterministic_per_seed() {
    let deck = create_deck();
    assert_eq!(shuffle_seeded(&deck, 7), shuffle_seeded(&deck, 7));
    assert_ne!(shuffle_seeded(&deck, 7), shuffle_seeded(&deck, 8));
}

#[test]
fn two_phase_deal_gives_five_then_eight() {
    let mut deck = shuffle_seeded(&create_deck(), 1);
    let mut hands = deal_initial(&mut deck).unwrap();
    assert_eq!(deck.len(), 12);
    for hand in &hands {
        assert_eq!(hand.len(), 5);
    }
    deal_remaining(&mut deck, &mut hands).unwrap();
    assert!(deck.is_empty());
    let mut all: Vec<_> = Vec::new();
    for hand in &hands {
        assert_eq!(hand.len(), 8);
        all.extend(hand.iter().copied());
    }
    let unique: HashSet<_> = all.iter().collect();
    assert_eq!(unique.len(), 32);
}

#[test]
fn deal_initial_rejects_short_deck() {
    let mut deck = create_deck();
    deck.truncate(20);
    assert!(deal_initial(&mut deck).is_err());
}

#[test]
fn deal_remaining_rejects_wrong_size() {
    let mut deck = shuffle_seeded(&create_deck(), 3);
    let mut hands = deal_initial(&mut deck).unwrap();
    deck.pop();
    assert!(deal_remaining(&mut deck, &mut hands).is_err());
}
