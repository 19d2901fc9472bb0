//! Round scoring and match-point conversion.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Contract;
use crate::domain::declarations::Declaration;
use crate::domain::rules::{Team, VALAT_BONUS};

/// Final round totals after the contract-fulfillment check and multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub team1_points: u32,
    pub team2_points: u32,
    pub team1_declarations: u32,
    pub team2_declarations: u32,
    pub contract_fulfilled: bool,
    pub valat: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPoints {
    pub team1: u32,
    pub team2: u32,
}

fn declaration_total(decls: &[Declaration]) -> u32 {
    decls.iter().map(|d| u32::from(d.points)).sum()
}

/// Compute a round's final point totals.
///
/// Declaration points are added to raw trick points first; the contract is
/// fulfilled iff the contract team's total strictly exceeds half the
/// combined total. On failure the opposing team takes everything. The
/// NO_TRUMPS (x2), doubled (x2), and redoubled (x4) multipliers compose on
/// the post-fulfillment totals.
#[allow(clippy::too_many_arguments)]
pub fn calculate_round_score(
    team1_trick_points: u32,
    team2_trick_points: u32,
    team1_declarations: &[Declaration],
    team2_declarations: &[Declaration],
    contract_team: Team,
    contract: Contract,
    is_doubled: bool,
    is_redoubled: bool,
) -> RoundScore {
    let team1_decl_points = declaration_total(team1_declarations);
    let team2_decl_points = declaration_total(team2_declarations);

    let team1_total = team1_trick_points + team1_decl_points;
    let team2_total = team2_trick_points + team2_decl_points;

    // Valat: one team swept every trick.
    let valat = team1_trick_points == 0 || team2_trick_points == 0;

    let contract_team_points = match contract_team {
        Team::NorthSouth => team1_total,
        Team::EastWest => team2_total,
    };
    let combined = team1_total + team2_total;
    let contract_fulfilled = contract_team_points * 2 > combined;

    let (mut team1_points, mut team2_points) = if contract_fulfilled {
        (team1_total, team2_total)
    } else {
        match contract_team {
            Team::NorthSouth => (0, combined),
            Team::EastWest => (combined, 0),
        }
    };

    let mut multiplier = 1;
    if contract == Contract::NoTrumps {
        multiplier *= 2;
    }
    if is_doubled {
        multiplier *= 2;
    }
    if is_redoubled {
        multiplier *= 4;
    }
    team1_points *= multiplier;
    team2_points *= multiplier;

    RoundScore {
        team1_points,
        team2_points,
        team1_declarations: team1_decl_points,
        team2_declarations: team2_decl_points,
        contract_fulfilled,
        valat,
    }
}

/// Per-contract rounding threshold for the points/10 conversion.
fn rounding_limit(contract: Contract) -> u32 {
    match contract {
        Contract::NoTrumps => 5,
        Contract::AllTrumps => 4,
        _ => 6,
    }
}

fn round_match_points(points: u32, limit: u32) -> u32 {
    let quotient = points / 10;
    let remainder = points % 10;
    if remainder < limit {
        quotient
    } else if remainder > limit {
        quotient + 1
    } else {
        // Exactly at the limit: round to nearest (half rounds up).
        if remainder >= 5 {
            quotient + 1
        } else {
            quotient
        }
    }
}

/// Convert a round's final totals into match points, applying the valat
/// bonus to the sweeping team (doubled under NO_TRUMPS).
pub fn convert_to_match_points(score: &RoundScore, contract: Contract) -> MatchPoints {
    let limit = rounding_limit(contract);
    let mut team1 = round_match_points(score.team1_points, limit);
    let mut team2 = round_match_points(score.team2_points, limit);

    if score.valat {
        let bonus = if contract == Contract::NoTrumps {
            VALAT_BONUS * 2
        } else {
            VALAT_BONUS
        };
        if score.team1_points > score.team2_points {
            team1 += bonus;
        } else {
            team2 += bonus;
        }
    }

    MatchPoints { team1, team2 }
}
