use crate::domain::bidding::{
    final_contract, is_bidding_complete, is_valid_bid, validate_bid, Bid,
};
use crate::domain::cards_types::Contract;

#[test]
fn four_passes_complete_with_no_contract() {
    let history = vec![Bid::pass(1), Bid::pass(2), Bid::pass(3), Bid::pass(0)];
    assert!(is_bidding_complete(&history));
    assert!(final_contract(&history).is_none());
}

#[test]
fn three_passes_alone_do_not_complete() {
    let history = vec![Bid::pass(1), Bid::pass(2), Bid::pass(3)];
    assert!(!is_bidding_complete(&history));
}

#[test]
fn contract_then_three_passes_completes() {
    let history = vec![
        Bid::contract(1, Contract::Hearts),
        Bid::pass(2),
        Bid::pass(3),
        Bid::pass(0),
    ];
    assert!(is_bidding_complete(&history));
    let outcome = final_contract(&history).unwrap();
    assert_eq!(outcome.contract, Contract::Hearts);
    assert_eq!(outcome.holder, 1);
    assert!(!outcome.doubled);
    assert!(!outcome.redoubled);
}

#[test]
fn contract_then_two_passes_does_not_complete() {
    let history = vec![Bid::contract(1, Contract::Hearts), Bid::pass(2), Bid::pass(3)];
    assert!(!is_bidding_complete(&history));
}

#[test]
fn contract_ladder_orders_bids() {
    let history = vec![Bid::contract(1, Contract::Clubs)];
    assert!(is_valid_bid(&history, &Bid::contract(2, Contract::Spades)));
    assert!(is_valid_bid(&history, &Bid::contract(2, Contract::NoTrumps)));
    assert!(is_valid_bid(&history, &Bid::contract(2, Contract::AllTrumps)));

    let history = vec![Bid::contract(1, Contract::Spades)];
    assert!(!is_valid_bid(&history, &Bid::contract(2, Contract::Clubs)));
    assert!(!is_valid_bid(&history, &Bid::contract(2, Contract::Spades)));
    assert!(is_valid_bid(&history, &Bid::contract(2, Contract::NoTrumps)));
}

#[test]
fn pass_is_always_legal() {
    assert!(is_valid_bid(&[], &Bid::pass(0)));
    let history = vec![Bid::contract(1, Contract::AllTrumps)];
    assert!(is_valid_bid(&history, &Bid::pass(2)));
}

#[test]
fn double_requires_opposing_contract() {
    let history = vec![Bid::contract(1, Contract::Hearts)];
    // Seat 2 opposes seat 1
    assert!(is_valid_bid(&history, &Bid::double(2)));
    // Seat 3 is seat 1's partner
    assert!(validate_bid(&history, &Bid::double(3)).is_err());
    // No contract yet
    assert!(validate_bid(&[], &Bid::double(2)).is_err());
    // Not directly after the contract bid
    let history = vec![Bid::contract(1, Contract::Hearts), Bid::pass(2)];
    assert!(validate_bid(&history, &Bid::double(0)).is_err());
}

#[test]
fn redouble_requires_preceding_double() {
    let history = vec![Bid::contract(1, Contract::Hearts), Bid::double(2)];
    assert!(is_valid_bid(&history, &Bid::redouble(1)));
    // Partner of the doubler cannot redouble
    assert!(validate_bid(&history, &Bid::redouble(0)).is_err());
    let history = vec![Bid::contract(1, Contract::Hearts)];
    assert!(validate_bid(&history, &Bid::redouble(2)).is_err());
}

#[test]
fn final_contract_tracks_modifiers() {
    let history = vec![
        Bid::contract(1, Contract::Hearts),
        Bid::double(2),
        Bid::pass(3),
        Bid::pass(0),
        Bid::pass(1),
    ];
    let outcome = final_contract(&history).unwrap();
    assert!(outcome.doubled);
    assert!(!outcome.redoubled);

    let history = vec![
        Bid::contract(1, Contract::Hearts),
        Bid::double(2),
        Bid::redouble(1),
        Bid::pass(2),
        Bid::pass(3),
        Bid::pass(0),
    ];
    let outcome = final_contract(&history).unwrap();
    assert!(!outcome.doubled);
    assert!(outcome.redoubled);
}

#[test]
fn later_contract_clears_earlier_modifiers() {
    let history = vec![
        Bid::contract(1, Contract::Clubs),
        Bid::double(2),
        Bid::contract(3, Contract::Hearts),
        Bid::pass(0),
        Bid::pass(1),
        Bid::pass(2),
    ];
    let outcome = final_contract(&history).unwrap();
    assert_eq!(outcome.contract, Contract::Hearts);
    assert_eq!(outcome.holder, 3);
    assert!(!outcome.doubled);
    assert!(!outcome.redoubled);
}

#[test]
fn contract_bid_without_contract_is_rejected() {
    let mut bid = Bid::contract(0, Contract::Clubs);
    bid.contract = None;
    assert!(validate_bid(&[], &bid).is_err());
}
