//! Declaration (combination) detection and comparison.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, Rank, Suit, SUITS};
use crate::domain::rules::{Seat, BELOTE_POINTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeclarationKind {
    Tierce,
    Quarte,
    Quinte,
    SquareJacks,
    SquareNines,
    SquareAces,
    SquareTens,
    SquareKings,
    SquareQueens,
    Belote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub cards: Vec<Card>,
    pub points: u16,
    pub seat: Seat,
}

/// Position of a rank in the declaration sequence order A,K,Q,J,10,9,8,7
/// (higher is stronger). Distinct from both trick orders.
fn sequence_pos(rank: Rank) -> u8 {
    match rank {
        Rank::Ace => 7,
        Rank::King => 6,
        Rank::Queen => 5,
        Rank::Jack => 4,
        Rank::Ten => 3,
        Rank::Nine => 2,
        Rank::Eight => 1,
        Rank::Seven => 0,
    }
}

fn rank_at_pos(pos: u8) -> Rank {
    match pos {
        7 => Rank::Ace,
        6 => Rank::King,
        5 => Rank::Queen,
        4 => Rank::Jack,
        3 => Rank::Ten,
        2 => Rank::Nine,
        1 => Rank::Eight,
        _ => Rank::Seven,
    }
}

fn sequence_declaration(suit: Suit, top: u8, len: usize, seat: Seat) -> Declaration {
    let (kind, points) = match len {
        3 => (DeclarationKind::Tierce, 20),
        4 => (DeclarationKind::Quarte, 50),
        _ => (DeclarationKind::Quinte, 100),
    };
    let cards = (0..len as u8)
        .map(|i| Card::new(suit, rank_at_pos(top - i)))
        .collect();
    Declaration {
        kind,
        cards,
        points,
        seat,
    }
}

fn square_declaration(rank: Rank, seat: Seat) -> Option<Declaration> {
    let (kind, points) = match rank {
        Rank::Jack => (DeclarationKind::SquareJacks, 200),
        Rank::Nine => (DeclarationKind::SquareNines, 150),
        Rank::Ace => (DeclarationKind::SquareAces, 100),
        Rank::Ten => (DeclarationKind::SquareTens, 100),
        Rank::King => (DeclarationKind::SquareKings, 100),
        Rank::Queen => (DeclarationKind::SquareQueens, 100),
        // Sevens and eights never form a square.
        Rank::Seven | Rank::Eight => return None,
    };
    let cards = SUITS.iter().map(|&s| Card::new(s, rank)).collect();
    Some(Declaration {
        kind,
        cards,
        points,
        seat,
    })
}

/// Scan a pre-play hand for every qualifying combination: maximal sequences
/// of length >= 3 per suit, squares, and belote (trump king + queen). A
/// longer run is never decomposed into sub-runs.
pub fn find_declarations(hand: &[Card], trump: Option<Suit>, seat: Seat) -> Vec<Declaration> {
    let mut found = Vec::new();

    for suit in SUITS {
        let mut positions: Vec<u8> = hand
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| sequence_pos(c.rank))
            .collect();
        positions.sort_unstable_by(|a, b| b.cmp(a));
        positions.dedup();

        let mut i = 0;
        while i < positions.len() {
            let mut j = i;
            while j + 1 < positions.len() && positions[j + 1] == positions[j] - 1 {
                j += 1;
            }
            let len = j - i + 1;
            if len >= 3 {
                found.push(sequence_declaration(suit, positions[i], len, seat));
            }
            i = j + 1;
        }
    }

    for rank in [
        Rank::Jack,
        Rank::Nine,
        Rank::Ace,
        Rank::Ten,
        Rank::King,
        Rank::Queen,
    ] {
        if hand.iter().filter(|c| c.rank == rank).count() == 4 {
            if let Some(d) = square_declaration(rank, seat) {
                found.push(d);
            }
        }
    }

    if let Some(trump) = trump {
        let has_king = hand.contains(&Card::new(trump, Rank::King));
        let has_queen = hand.contains(&Card::new(trump, Rank::Queen));
        if has_king && has_queen {
            found.push(Declaration {
                kind: DeclarationKind::Belote,
                cards: vec![Card::new(trump, Rank::King), Card::new(trump, Rank::Queen)],
                points: BELOTE_POINTS,
                seat,
            });
        }
    }

    found
}

/// Compare two declarations: higher points win; on equal points the higher
/// top card (in sequence order) wins.
pub fn compare_declarations(a: &Declaration, b: &Declaration) -> Ordering {
    a.points.cmp(&b.points).then_with(|| {
        let top = |d: &Declaration| {
            d.cards
                .iter()
                .map(|c| sequence_pos(c.rank))
                .max()
                .unwrap_or(0)
        };
        top(a).cmp(&top(b))
    })
}
