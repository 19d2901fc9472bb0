use crate::domain::cards_types::Contract;
use crate::domain::rules::Team;
use crate::domain::scoring::{calculate_round_score, convert_to_match_points};

#[test]
fn fulfilled_contract_keeps_totals() {
    let score = calculate_round_score(
        90,
        72,
        &[],
        &[],
        Team::NorthSouth,
        Contract::Hearts,
        false,
        false,
    );
    assert!(score.contract_fulfilled);
    assert!(!score.valat);
    assert_eq!(score.team1_points, 90);
    assert_eq!(score.team2_points, 72);
}

#[test]
fn failed_contract_gives_everything_to_opponents() {
    let score = calculate_round_score(
        70,
        92,
        &[],
        &[],
        Team::NorthSouth,
        Contract::Hearts,
        false,
        false,
    );
    assert!(!score.contract_fulfilled);
    assert_eq!(score.team1_points, 0);
    assert_eq!(score.team2_points, 162);
}

#[test]
fn exact_half_is_not_fulfilled() {
    let score = calculate_round_score(
        81,
        81,
        &[],
        &[],
        Team::EastWest,
        Contract::Clubs,
        false,
        false,
    );
    assert!(!score.contract_fulfilled);
    assert_eq!(score.team1_points, 162);
    assert_eq!(score.team2_points, 0);
}

#[test]
fn declarations_count_toward_fulfillment() {
    use crate::domain::cards_types::{Card, Rank, Suit};
    use crate::domain::declarations::find_declarations;
    // A tierce (20) swings a 75/87 round for the contract team.
    let hand = [
        Card::new(Suit::Spades, Rank::Ace),
        Card::new(Suit::Spades, Rank::King),
        Card::new(Suit::Spades, Rank::Queen),
    ];
    let decls = find_declarations(&hand, None, 0);
    let score = calculate_round_score(
        75,
        87,
        &decls,
        &[],
        Team::NorthSouth,
        Contract::Hearts,
        false,
        false,
    );
    assert!(score.contract_fulfilled);
    assert_eq!(score.team1_points, 95);
    assert_eq!(score.team1_declarations, 20);
}

#[test]
fn no_trumps_doubles_both_totals() {
    let score = calculate_round_score(
        90,
        72,
        &[],
        &[],
        Team::NorthSouth,
        Contract::NoTrumps,
        false,
        false,
    );
    assert_eq!(score.team1_points, 180);
    assert_eq!(score.team2_points, 144);
}

#[test]
fn doubled_and_redoubled_multipliers_compose() {
    let doubled = calculate_round_score(
        90,
        72,
        &[],
        &[],
        Team::NorthSouth,
        Contract::Hearts,
        true,
        false,
    );
    assert_eq!(doubled.team1_points, 180);
    assert_eq!(doubled.team2_points, 144);

    let redoubled = calculate_round_score(
        90,
        72,
        &[],
        &[],
        Team::NorthSouth,
        Contract::Hearts,
        false,
        true,
    );
    assert_eq!(redoubled.team1_points, 360);
    assert_eq!(redoubled.team2_points, 288);

    // NO_TRUMPS x2 composes with doubled x2
    let both = calculate_round_score(
        90,
        72,
        &[],
        &[],
        Team::NorthSouth,
        Contract::NoTrumps,
        true,
        false,
    );
    assert_eq!(both.team1_points, 360);
    assert_eq!(both.team2_points, 288);
}

#[test]
fn match_point_conversion_rounds_per_contract() {
    let score = calculate_round_score(
        90,
        72,
        &[],
        &[],
        Team::NorthSouth,
        Contract::Hearts,
        false,
        false,
    );
    let mp = convert_to_match_points(&score, Contract::Hearts);
    // 90 rem 0 rounds down to 9; 72 rem 2 < 6 rounds down to 7
    assert_eq!(mp.team1, 9);
    assert_eq!(mp.team2, 7);
}

#[test]
fn remainder_above_threshold_rounds_up() {
    let score = calculate_round_score(
        97,
        65,
        &[],
        &[],
        Team::NorthSouth,
        Contract::Hearts,
        false,
        false,
    );
    let mp = convert_to_match_points(&score, Contract::Hearts);
    // 97 rem 7 > 6 rounds up; 65 rem 5 < 6 rounds down
    assert_eq!(mp.team1, 10);
    assert_eq!(mp.team2, 6);
}

#[test]
fn valat_adds_flat_bonus() {
    let score = calculate_round_score(
        162,
        0,
        &[],
        &[],
        Team::NorthSouth,
        Contract::Hearts,
        false,
        false,
    );
    assert!(score.valat);
    let mp = convert_to_match_points(&score, Contract::Hearts);
    assert_eq!(mp.team1, 16 + 9);
    assert_eq!(mp.team2, 0);
}

#[test]
fn valat_bonus_doubles_under_no_trumps() {
    let score = calculate_round_score(
        130,
        0,
        &[],
        &[],
        Team::NorthSouth,
        Contract::NoTrumps,
        false,
        false,
    );
    assert!(score.valat);
    assert_eq!(score.team1_points, 260);
    let mp = convert_to_match_points(&score, Contract::NoTrumps);
    assert_eq!(mp.team1, 26 + 18);
    assert_eq!(mp.team2, 0);
}
