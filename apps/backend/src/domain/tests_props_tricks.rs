use proptest::prelude::*;

use crate::domain::cards_logic::{card_beats, card_points};
use crate::domain::cards_types::{Card, Contract};
use crate::domain::deck::{create_deck, shuffle_seeded};
use crate::domain::tricks::{trick_points, trick_winner, validate_play, TrickPlay};

fn arb_contract() -> impl Strategy<Value = Contract> {
    prop_oneof![
        Just(Contract::Clubs),
        Just(Contract::Diamonds),
        Just(Contract::Hearts),
        Just(Contract::Spades),
        Just(Contract::NoTrumps),
        Just(Contract::AllTrumps),
    ]
}

/// Four distinct cards drawn from a seeded shuffle of the deck.
fn arb_trick() -> impl Strategy<Value = Vec<TrickPlay>> {
    any::<u64>().prop_map(|seed| {
        let deck = shuffle_seeded(&create_deck(), seed);
        deck[..4]
            .iter()
            .enumerate()
            .map(|(i, &card)| TrickPlay {
                seat: i as u8,
                card,
            })
            .collect()
    })
}

/// A hand and a disjoint partial trick from the same shuffle.
fn arb_hand_and_trick() -> impl Strategy<Value = (Vec<Card>, Vec<TrickPlay>)> {
    (any::<u64>(), 1usize..=8, 0usize..4).prop_map(|(seed, hand_size, trick_len)| {
        let deck = shuffle_seeded(&create_deck(), seed);
        let hand = deck[..hand_size].to_vec();
        let trick = deck[hand_size..hand_size + trick_len]
            .iter()
            .enumerate()
            .map(|(i, &card)| TrickPlay {
                seat: (i + 1) as u8,
                card,
            })
            .collect();
        (hand, trick)
    })
}

proptest! {
    #[test]
    fn winner_card_is_unbeaten(trick in arb_trick(), contract in arb_contract()) {
        let winner = trick_winner(&trick, contract).unwrap();
        let lead = trick[0].card.suit;
        let winning_card = trick.iter().find(|p| p.seat == winner).unwrap().card;
        for play in &trick {
            prop_assert!(!card_beats(play.card, winning_card, lead, contract));
        }
    }

    #[test]
    fn winner_is_a_participant(trick in arb_trick(), contract in arb_contract()) {
        let winner = trick_winner(&trick, contract).unwrap();
        prop_assert!(trick.iter().any(|p| p.seat == winner));
    }

    #[test]
    fn trick_points_are_sum_of_card_points(trick in arb_trick(), contract in arb_contract()) {
        let expected: u16 = trick.iter().map(|p| card_points(p.card, contract)).sum();
        prop_assert_eq!(trick_points(&trick, contract), expected);
    }

    #[test]
    fn some_card_is_always_playable(
        (hand, trick) in arb_hand_and_trick(),
        contract in arb_contract(),
    ) {
        let playable = hand
            .iter()
            .any(|&card| validate_play(&hand, &trick, 0, card, contract).is_ok());
        prop_assert!(playable);
    }

    #[test]
    fn shuffle_preserves_the_multiset(seed in any::<u64>()) {
        let deck = create_deck();
        let mut shuffled = shuffle_seeded(&deck, seed);
        shuffled.sort();
        let mut sorted = deck;
        sorted.sort();
        prop_assert_eq!(shuffled, sorted);
    }
}

#[test]
fn deck_totals_per_contract() {
    let deck = create_deck();
    let total = |contract| -> u16 { deck.iter().map(|&c| card_points(c, contract)).sum() };
    // Trump suit contributes 62, the other three suits 30 each.
    assert_eq!(total(Contract::Hearts), 152);
    assert_eq!(total(Contract::NoTrumps), 120);
    assert_eq!(total(Contract::AllTrumps), 248);
}
