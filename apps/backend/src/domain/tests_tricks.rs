use crate::domain::cards_types::{Card, Contract, Rank, Suit};
use crate::domain::tricks::{trick_points, trick_winner, validate_play, TrickPlay};
use crate::errors::domain::{DomainError, ValidationKind};

fn c(suit: Suit, rank: Rank) -> Card {
    Card { suit, rank }
}

fn kind_of(err: &DomainError) -> Option<ValidationKind> {
    match err {
        DomainError::Validation(kind, _) => Some(kind.clone()),
        _ => None,
    }
}

fn play(seat: u8, card: Card) -> TrickPlay {
    TrickPlay { seat, card }
}

#[test]
fn card_must_be_in_hand() {
    let hand = vec![c(Suit::Hearts, Rank::Ace)];
    let err = validate_play(&hand, &[], 0, c(Suit::Hearts, Rank::King), Contract::Spades)
        .unwrap_err();
    assert_eq!(kind_of(&err), Some(ValidationKind::CardNotInHand));
}

#[test]
fn first_card_of_trick_is_free() {
    let hand = vec![c(Suit::Clubs, Rank::Seven), c(Suit::Hearts, Rank::Ace)];
    assert!(validate_play(&hand, &[], 0, c(Suit::Clubs, Rank::Seven), Contract::Spades).is_ok());
}

#[test]
fn must_follow_lead_suit_when_able() {
    let hand = vec![c(Suit::Hearts, Rank::Seven), c(Suit::Clubs, Rank::Ace)];
    let trick = vec![play(3, c(Suit::Hearts, Rank::King))];
    let err = validate_play(&hand, &trick, 0, c(Suit::Clubs, Rank::Ace), Contract::Spades)
        .unwrap_err();
    assert_eq!(kind_of(&err), Some(ValidationKind::MustFollowSuit));
    assert!(
        validate_play(&hand, &trick, 0, c(Suit::Hearts, Rank::Seven), Contract::Spades).is_ok()
    );
}

#[test]
fn lacking_lead_suit_permits_any_card() {
    let hand = vec![c(Suit::Clubs, Rank::Ace), c(Suit::Diamonds, Rank::Seven)];
    let trick = vec![play(3, c(Suit::Hearts, Rank::King))];
    assert!(validate_play(&hand, &trick, 0, c(Suit::Clubs, Rank::Ace), Contract::Spades).is_ok());
    assert!(
        validate_play(&hand, &trick, 0, c(Suit::Diamonds, Rank::Seven), Contract::Spades).is_ok()
    );
}

#[test]
fn void_in_lead_suit_must_trump_when_holding_one() {
    let hand = vec![c(Suit::Spades, Rank::Seven), c(Suit::Clubs, Rank::Ace)];
    let trick = vec![play(3, c(Suit::Hearts, Rank::King))];
    let err = validate_play(&hand, &trick, 0, c(Suit::Clubs, Rank::Ace), Contract::Spades)
        .unwrap_err();
    assert_eq!(kind_of(&err), Some(ValidationKind::MustPlayTrump));
    assert!(
        validate_play(&hand, &trick, 0, c(Suit::Spades, Rank::Seven), Contract::Spades).is_ok()
    );
}

#[test]
fn discard_is_free_when_void_without_trump() {
    // No hearts, no spades: any discard goes.
    let hand = vec![c(Suit::Clubs, Rank::Ace), c(Suit::Diamonds, Rank::Seven)];
    let trick = vec![play(3, c(Suit::Hearts, Rank::King))];
    assert!(validate_play(&hand, &trick, 0, c(Suit::Clubs, Rank::Ace), Contract::Spades).is_ok());
    // And under NO_TRUMPS there is no trump obligation at all.
    let hand = vec![c(Suit::Spades, Rank::Seven), c(Suit::Clubs, Rank::Ace)];
    assert!(
        validate_play(&hand, &trick, 0, c(Suit::Clubs, Rank::Ace), Contract::NoTrumps).is_ok()
    );
}

#[test]
fn chosen_trump_must_overtrump_when_able() {
    // Seat 0 lacks hearts, holds the trump jack and seven; seat 3 (an
    // opponent) already trumped with the nine.
    let hand = vec![c(Suit::Spades, Rank::Jack), c(Suit::Spades, Rank::Seven)];
    let trick = vec![
        play(2, c(Suit::Hearts, Rank::King)),
        play(3, c(Suit::Spades, Rank::Nine)),
    ];
    let err = validate_play(&hand, &trick, 0, c(Suit::Spades, Rank::Seven), Contract::Spades)
        .unwrap_err();
    assert_eq!(kind_of(&err), Some(ValidationKind::MustOvertrump));
    assert!(
        validate_play(&hand, &trick, 0, c(Suit::Spades, Rank::Jack), Contract::Spades).is_ok()
    );
}

#[test]
fn undertrump_allowed_when_no_higher_trump_held() {
    let hand = vec![c(Suit::Spades, Rank::Seven), c(Suit::Clubs, Rank::Ace)];
    let trick = vec![
        play(2, c(Suit::Hearts, Rank::King)),
        play(3, c(Suit::Spades, Rank::Nine)),
    ];
    assert!(
        validate_play(&hand, &trick, 0, c(Suit::Spades, Rank::Seven), Contract::Spades).is_ok()
    );
}

#[test]
fn undertrump_allowed_when_partner_is_winning() {
    // Partner (seat 2) holds the trick with the trump nine.
    let hand = vec![c(Suit::Spades, Rank::Jack), c(Suit::Spades, Rank::Seven)];
    let trick = vec![
        play(1, c(Suit::Hearts, Rank::King)),
        play(2, c(Suit::Spades, Rank::Nine)),
        play(3, c(Suit::Hearts, Rank::Ace)),
    ];
    assert!(
        validate_play(&hand, &trick, 0, c(Suit::Spades, Rank::Seven), Contract::Spades).is_ok()
    );
}

#[test]
fn trump_beats_any_non_trump() {
    let trick = vec![
        play(0, c(Suit::Hearts, Rank::Ace)),
        play(1, c(Suit::Spades, Rank::Seven)),
        play(2, c(Suit::Hearts, Rank::Ten)),
        play(3, c(Suit::Hearts, Rank::King)),
    ];
    assert_eq!(trick_winner(&trick, Contract::Spades).unwrap(), 1);
}

#[test]
fn highest_trump_wins_among_trumps() {
    let trick = vec![
        play(0, c(Suit::Spades, Rank::Ace)),
        play(1, c(Suit::Spades, Rank::Nine)),
        play(2, c(Suit::Spades, Rank::Jack)),
        play(3, c(Suit::Spades, Rank::Ten)),
    ];
    assert_eq!(trick_winner(&trick, Contract::Spades).unwrap(), 2);
}

#[test]
fn off_suit_non_trump_never_wins() {
    let trick = vec![
        play(0, c(Suit::Hearts, Rank::Seven)),
        play(1, c(Suit::Clubs, Rank::Ace)),
        play(2, c(Suit::Diamonds, Rank::Ace)),
        play(3, c(Suit::Hearts, Rank::Eight)),
    ];
    assert_eq!(trick_winner(&trick, Contract::NoTrumps).unwrap(), 3);
}

#[test]
fn trick_winner_requires_four_cards() {
    let trick = vec![play(0, c(Suit::Hearts, Rank::Seven))];
    assert!(trick_winner(&trick, Contract::Hearts).is_err());
}

#[test]
fn trick_points_are_contextual() {
    let trick = vec![
        play(0, c(Suit::Spades, Rank::Jack)),
        play(1, c(Suit::Spades, Rank::Nine)),
        play(2, c(Suit::Hearts, Rank::Jack)),
        play(3, c(Suit::Hearts, Rank::Ace)),
    ];
    // Trump J (20) + trump 9 (14) + plain J (2) + plain A (11)
    assert_eq!(trick_points(&trick, Contract::Spades), 47);
    // All plain under NO_TRUMPS: 2 + 0 + 2 + 11
    assert_eq!(trick_points(&trick, Contract::NoTrumps), 15);
    // All trump under ALL_TRUMPS: 20 + 14 + 20 + 11
    assert_eq!(trick_points(&trick, Contract::AllTrumps), 65);
}
