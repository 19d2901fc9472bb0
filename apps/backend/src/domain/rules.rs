//! Fixed game rules and seat arithmetic.

pub const PLAYERS: usize = 4;
pub const DECK_SIZE: usize = 32;
pub const HAND_SIZE: usize = 8;
pub const TRICKS_PER_ROUND: usize = 8;

pub const MATCH_POINTS_TO_WIN: u32 = 151;
pub const LAST_TRICK_BONUS: u16 = 10;
pub const BELOTE_POINTS: u16 = 20;

/// Flat match-point bonus for taking every trick in a round; doubled under
/// NO_TRUMPS.
pub const VALAT_BONUS: u32 = 9;

/// Seat index around the table, clockwise from the dealer's left.
pub type Seat = u8;

/// Two fixed teams: seats 0+2 vs seats 1+3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Team {
    NorthSouth,
    EastWest,
}

impl Team {
    pub fn of_seat(seat: Seat) -> Team {
        if seat % 2 == 0 {
            Team::NorthSouth
        } else {
            Team::EastWest
        }
    }

    pub fn opponent(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }
}

pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % PLAYERS as u8
}

pub fn partner_seat(seat: Seat) -> Seat {
    (seat + 2) % PLAYERS as u8
}

pub fn same_team(a: Seat, b: Seat) -> bool {
    a % 2 == b % 2
}
