//! Card parsing from wire tokens (e.g., "AS", "7C", "TD")

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(rank_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(DomainError::validation(
                ValidationKind::ParseCard,
                format!("Parse card: {s}"),
            ));
        };
        let rank = match rank_ch {
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::ParseCard,
                    format!("Parse card: {s}"),
                ))
            }
        };
        let suit = match suit_ch {
            'C' => Suit::Clubs,
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::ParseCard,
                    format!("Parse card: {s}"),
                ))
            }
        };
        Ok(Card { suit, rank })
    }
}

impl Card {
    pub fn rank_char(self) -> char {
        match self.rank {
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn suit_char(self) -> char {
        match self.suit {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    /// Compact wire token, e.g. "AS" for the ace of spades.
    pub fn token(self) -> String {
        format!("{}{}", self.rank_char(), self.suit_char())
    }
}

// Display uses the suit symbol ("A♠") for logs and debug output; the wire
// format stays ASCII via `token()` / serde.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit.symbol())
    }
}

/// Non-panicking helper to parse card tokens into Card instances.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
