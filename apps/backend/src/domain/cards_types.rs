//! Core card-related types: Card, Rank, Suit, Contract

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

pub const SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

/// Belote contract ladder. `Ord` follows bidding strength:
/// CLUBS < DIAMONDS < HEARTS < SPADES < NO_TRUMPS < ALL_TRUMPS.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Contract {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    NoTrumps,
    AllTrumps,
}

impl Contract {
    /// The trump suit in play under this contract. NoTrumps and AllTrumps
    /// have no single trump suit.
    pub fn trump_suit(self) -> Option<Suit> {
        match self {
            Contract::Clubs => Some(Suit::Clubs),
            Contract::Diamonds => Some(Suit::Diamonds),
            Contract::Hearts => Some(Suit::Hearts),
            Contract::Spades => Some(Suit::Spades),
            Contract::NoTrumps | Contract::AllTrumps => None,
        }
    }
}

impl From<Suit> for Contract {
    fn from(suit: Suit) -> Self {
        match suit {
            Suit::Clubs => Contract::Clubs,
            Suit::Diamonds => Contract::Diamonds,
            Suit::Hearts => Contract::Hearts,
            Suit::Spades => Contract::Spades,
        }
    }
}

impl TryFrom<Contract> for Suit {
    type Error = DomainError;

    fn try_from(contract: Contract) -> Result<Self, Self::Error> {
        contract.trump_suit().ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidTrumpConversion,
                "Contract has no trump suit",
            )
        })
    }
}

/// Belote uses the short pack: 7 through Ace, 8 ranks per suit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

pub const RANKS: [Rank; 8] = [
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

impl Rank {
    /// Trump order: J > 9 > A > 10 > K > Q > 8 > 7.
    pub fn trump_order(self) -> u8 {
        match self {
            Rank::Jack => 8,
            Rank::Nine => 7,
            Rank::Ace => 6,
            Rank::Ten => 5,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Eight => 2,
            Rank::Seven => 1,
        }
    }

    /// Non-trump order: A > 10 > K > Q > J > 9 > 8 > 7.
    pub fn plain_order(self) -> u8 {
        match self {
            Rank::Ace => 8,
            Rank::Ten => 7,
            Rank::King => 6,
            Rank::Queen => 5,
            Rank::Jack => 4,
            Rank::Nine => 3,
            Rank::Eight => 2,
            Rank::Seven => 1,
        }
    }

    /// Card points when the card's suit is trump.
    pub fn trump_value(self) -> u16 {
        match self {
            Rank::Jack => 20,
            Rank::Nine => 14,
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Eight | Rank::Seven => 0,
        }
    }

    /// Card points when the card's suit is not trump.
    pub fn plain_value(self) -> u16 {
        match self {
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Jack => 2,
            Rank::Nine | Rank::Eight | Rank::Seven => 0,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn is_trump(self, trump: Option<Suit>) -> bool {
        trump == Some(self.suit)
    }

    /// Contextual point value: trump value when this card's suit is the
    /// active trump, non-trump value otherwise.
    pub fn points(self, trump: Option<Suit>) -> u16 {
        if self.is_trump(trump) {
            self.rank.trump_value()
        } else {
            self.rank.plain_value()
        }
    }
}

// Note: Ord/Eq on Card is only for stable sorting: suit order C<D<H<S then
// rank order. Do not use for trick resolution, which depends on trump/lead.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
