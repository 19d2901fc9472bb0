//! Placeholder heuristic bot: bids its strongest suit when strong enough,
//! plays the lowest-value legal card.

use crate::ai::trait_def::{BotBid, BotError, BotPlayer};
use crate::domain::bidding::{final_contract, Bid};
use crate::domain::cards_logic::card_points;
use crate::domain::cards_types::{Card, Contract, SUITS};
use crate::domain::rules::Seat;
use crate::domain::tricks::{validate_play, TrickPlay};

const BID_STRENGTH_THRESHOLD: u16 = 30;

#[derive(Debug, Default)]
pub struct HeuristicBot;

impl HeuristicBot {
    pub fn new() -> Self {
        Self
    }
}

impl BotPlayer for HeuristicBot {
    fn choose_bid(&self, hand: &[Card], bids: &[Bid]) -> Result<BotBid, BotError> {
        // Rate each suit by the trump value its cards would carry.
        let strongest = SUITS
            .into_iter()
            .map(|suit| {
                let strength: u16 = hand
                    .iter()
                    .filter(|c| c.suit == suit)
                    .map(|c| c.rank.trump_value())
                    .sum();
                (suit, strength)
            })
            .max_by_key(|&(_, strength)| strength);

        let Some((suit, strength)) = strongest else {
            return Ok(BotBid::Pass);
        };
        if strength < BID_STRENGTH_THRESHOLD {
            return Ok(BotBid::Pass);
        }

        let candidate = Contract::from(suit);
        match final_contract(bids) {
            Some(outcome) if candidate <= outcome.contract => Ok(BotBid::Pass),
            _ => Ok(BotBid::Contract(candidate)),
        }
    }

    fn choose_card(
        &self,
        hand: &[Card],
        trick: &[TrickPlay],
        contract: Contract,
        seat: Seat,
    ) -> Result<Card, BotError> {
        let mut legal: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|&card| validate_play(hand, trick, seat, card, contract).is_ok())
            .collect();
        if legal.is_empty() {
            return Err(BotError::InvalidMove("no legal card to play".into()));
        }
        legal.sort_by_key(|&card| (card_points(card, contract), card.rank.plain_order()));
        Ok(legal[0])
    }
}
