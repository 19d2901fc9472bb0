//! Session orchestrator: maps inbound intents to rule-engine calls against
//! the stored snapshot, persists the result, then broadcasts outcomes.
//!
//! Every mutation for a game runs under that game's mutex, so at most one
//! intent is in flight per game. Events are emitted only after the snapshot
//! has been persisted; a failed persist discards the in-memory computation
//! and leaves the prior snapshot authoritative.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::ai::{BotBid, BotPlayer};
use crate::domain::bidding::{final_contract, is_bidding_complete, validate_bid, Bid, BidKind};
use crate::domain::cards_types::{Card, Contract};
use crate::domain::deck::{create_deck, deal_initial, deal_remaining, shuffle};
use crate::domain::declarations::{find_declarations, DeclarationKind};
use crate::domain::game::{Game, GamePhase, GameStatus};
use crate::domain::rules::{next_seat, Seat, Team, PLAYERS};
use crate::domain::scoring::{calculate_round_score, convert_to_match_points};
use crate::domain::snapshot::GameSession;
use crate::domain::tricks::{trick_points, trick_winner, validate_play, TrickPlay};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::games::GameRepository;
use crate::services::turn_timer::TurnTimers;
use crate::store::SessionStore;
use crate::ws::hub::GameHub;
use crate::ws::protocol::ServerMsg;

/// Who is acting: a connected player (resolved to a seat) or a seat driven
/// directly by the bot takeover path.
#[derive(Debug, Clone, Copy)]
enum Actor {
    Player(Uuid),
    Seat(Seat),
}

/// An outcome event staged during a mutation, delivered after persist.
enum Emit {
    Room(ServerMsg),
    Player(Uuid, ServerMsg),
}

pub struct GameFlowService {
    store: SessionStore,
    hub: Arc<GameHub>,
    games: Arc<dyn GameRepository>,
    bot: Arc<dyn BotPlayer>,
    /// Per-game serialization point.
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
    timers: TurnTimers,
    turn_timeout: Duration,
}

impl GameFlowService {
    pub fn new(
        store: SessionStore,
        hub: Arc<GameHub>,
        games: Arc<dyn GameRepository>,
        bot: Arc<dyn BotPlayer>,
        turn_timeout: Duration,
    ) -> Self {
        Self {
            store,
            hub,
            games,
            bot,
            locks: DashMap::new(),
            timers: TurnTimers::new(),
            turn_timeout,
        }
    }

    pub fn hub(&self) -> Arc<GameHub> {
        self.hub.clone()
    }

    fn lock_for(&self, game_id: Uuid) -> Arc<Mutex<()>> {
        self.locks.entry(game_id).or_default().clone()
    }

    async fn load(&self, game_id: Uuid) -> Result<GameSession, DomainError> {
        self.store.get_session(game_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Session, format!("Unknown game {game_id}"))
        })
    }

    fn resolve_seat(session: &GameSession, actor: Actor) -> Result<Seat, DomainError> {
        match actor {
            Actor::Player(user) => session.game.seat_of(user).ok_or_else(|| {
                DomainError::validation(ValidationKind::NotSeated, "Not a player in this game")
            }),
            Actor::Seat(seat) => Ok(seat),
        }
    }

    fn deliver(&self, game_id: Uuid, emits: Vec<Emit>) {
        for emit in emits {
            match emit {
                Emit::Room(msg) => self.hub.broadcast(game_id, msg),
                Emit::Player(user, msg) => self.hub.send_to(user, msg),
            }
        }
    }

    /// Persist the snapshot, then deliver staged events in order.
    async fn persist_and_emit(
        &self,
        session: &mut GameSession,
        emits: Vec<Emit>,
    ) -> Result<(), DomainError> {
        session.bump_version();
        self.store.put_session(session).await?;
        self.deliver(session.game.id, emits);
        Ok(())
    }

    /// Create a fresh session for four matched players.
    pub async fn create_game(&self, players: [Uuid; PLAYERS]) -> Result<GameSession, AppError> {
        let game = Game::new(Uuid::new_v4(), players);
        let session = GameSession::new(game);
        self.store.put_session(&session).await?;
        info!(game_id = %session.game.id, "game created");
        Ok(session)
    }

    pub async fn join_game(&self, game_id: Uuid, user: Uuid) -> Result<(), AppError> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().await;

        let mut session = self.load(game_id).await?;
        let seat = Self::resolve_seat(&session, Actor::Player(user))?;
        self.hub.join_room(game_id, user);
        // A returning player reclaims their seat from the bot.
        session.bots[usize::from(seat)] = false;

        let emits = vec![Emit::Room(ServerMsg::PlayerJoined {
            game_id,
            user_id: user,
            seat,
        })];
        self.persist_and_emit(&mut session, emits).await?;
        Ok(())
    }

    pub async fn ready(self: &Arc<Self>, game_id: Uuid, user: Uuid) -> Result<(), AppError> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().await;

        let mut session = self.load(game_id).await?;
        let seat = Self::resolve_seat(&session, Actor::Player(user))?;
        if session.game.status != GameStatus::Waiting {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Game already started",
            )
            .into());
        }

        session.ready[usize::from(seat)] = true;
        let mut emits = vec![Emit::Room(ServerMsg::PlayerReady { game_id, seat })];

        if session.all_ready() {
            session.game.start()?;
            self.deal_and_open_bidding(&mut session, &mut emits).await?;
        }

        self.persist_and_emit(&mut session, emits).await?;
        self.schedule_turn(&session);
        Ok(())
    }

    pub async fn place_bid(
        self: &Arc<Self>,
        game_id: Uuid,
        user: Uuid,
        kind: BidKind,
        contract: Option<Contract>,
    ) -> Result<(), AppError> {
        self.place_bid_as(game_id, Actor::Player(user), kind, contract)
            .await
    }

    pub async fn play_card(
        self: &Arc<Self>,
        game_id: Uuid,
        user: Uuid,
        card: Card,
    ) -> Result<(), AppError> {
        self.play_card_as(game_id, Actor::Player(user), card).await
    }

    pub async fn declare(
        &self,
        game_id: Uuid,
        user: Uuid,
        kind: DeclarationKind,
    ) -> Result<(), AppError> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().await;

        let mut session = self.load(game_id).await?;
        let seat = Self::resolve_seat(&session, Actor::Player(user))?;
        if session.game.status != GameStatus::Active
            || session.game.phase != GamePhase::Declaring
        {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Declarations are disclosed before the first card is played",
            )
            .into());
        }

        let hand = self
            .store
            .get_hand(game_id, session.game.player_at(seat))
            .await?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Hand, "Hand expired"))?;

        let found = find_declarations(&hand, session.round.trump_suit(), seat);
        let declaration = found
            .into_iter()
            .find(|d| d.kind == kind)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidDeclaration,
                    "No such combination in hand",
                )
            })?;
        let duplicate = session
            .round
            .declarations
            .iter()
            .any(|d| d.seat == seat && d.kind == declaration.kind && d.cards == declaration.cards);
        if duplicate {
            return Err(DomainError::validation(
                ValidationKind::InvalidDeclaration,
                "Combination already declared",
            )
            .into());
        }

        let points = declaration.points;
        session.round.declarations.push(declaration);
        let emits = vec![Emit::Room(ServerMsg::DeclarationMade {
            game_id,
            seat,
            declaration: kind,
            points,
        })];
        self.persist_and_emit(&mut session, emits).await?;
        Ok(())
    }

    async fn place_bid_as(
        self: &Arc<Self>,
        game_id: Uuid,
        actor: Actor,
        kind: BidKind,
        contract: Option<Contract>,
    ) -> Result<(), AppError> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().await;

        let mut session = self.load(game_id).await?;
        let seat = Self::resolve_seat(&session, actor)?;
        if session.game.status != GameStatus::Active
            || session.game.phase != GamePhase::Bidding
        {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Not in the bidding phase",
            )
            .into());
        }
        if session.game.current_player != seat {
            return Err(
                DomainError::validation(ValidationKind::OutOfTurn, "Not your turn").into(),
            );
        }

        let bid = match kind {
            BidKind::Pass => Bid::pass(seat),
            BidKind::Contract => {
                let contract = contract.ok_or_else(|| {
                    DomainError::validation(
                        ValidationKind::InvalidBid,
                        "Contract bid requires a contract",
                    )
                })?;
                Bid::contract(seat, contract)
            }
            BidKind::Double => Bid::double(seat),
            BidKind::Redouble => Bid::redouble(seat),
        };
        validate_bid(&session.round.bids, &bid)?;

        self.timers.disarm(game_id);
        session.round.bids.push(bid);
        let mut emits = vec![Emit::Room(ServerMsg::BidPlaced {
            game_id,
            seat,
            bid_type: kind,
            contract: bid.contract,
        })];

        if is_bidding_complete(&session.round.bids) {
            match final_contract(&session.round.bids) {
                None => {
                    // Four passes: redeal with the next dealer.
                    emits.push(Emit::Room(ServerMsg::BiddingComplete {
                        game_id,
                        contract: None,
                        holder: None,
                        doubled: false,
                        redoubled: false,
                    }));
                    session.game.transition_to(GamePhase::Dealing)?;
                    session.redeal();
                    self.deal_and_open_bidding(&mut session, &mut emits).await?;
                }
                Some(outcome) => {
                    session.round.set_contract(outcome);
                    emits.push(Emit::Room(ServerMsg::BiddingComplete {
                        game_id,
                        contract: Some(outcome.contract),
                        holder: Some(outcome.holder),
                        doubled: outcome.doubled,
                        redoubled: outcome.redoubled,
                    }));
                    self.complete_the_deal(&mut session, &mut emits).await?;
                    session.game.transition_to(GamePhase::Declaring)?;
                    let opener = next_seat(session.game.dealer);
                    Self::turn_to(&mut session, opener, &mut emits);
                }
            }
        } else {
            Self::turn_to(&mut session, next_seat(seat), &mut emits);
        }

        self.persist_and_emit(&mut session, emits).await?;
        self.schedule_turn(&session);
        Ok(())
    }

    async fn play_card_as(
        self: &Arc<Self>,
        game_id: Uuid,
        actor: Actor,
        card: Card,
    ) -> Result<(), AppError> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().await;

        let mut session = self.load(game_id).await?;
        let seat = Self::resolve_seat(&session, actor)?;
        if session.game.status != GameStatus::Active
            || !matches!(
                session.game.phase,
                GamePhase::Declaring | GamePhase::Playing
            )
        {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Not in the playing phase",
            )
            .into());
        }
        if session.game.current_player != seat {
            return Err(
                DomainError::validation(ValidationKind::OutOfTurn, "Not your turn").into(),
            );
        }
        let contract = session
            .round
            .contract
            .ok_or_else(|| DomainError::validation_other("No contract in play"))?;

        let player = session.game.player_at(seat);
        let mut hand = self
            .store
            .get_hand(game_id, player)
            .await?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Hand, "Hand expired"))?;
        validate_play(&hand, &session.round.current_trick, seat, card, contract)?;

        // First card of the round closes the declaration window.
        if session.game.phase == GamePhase::Declaring {
            session.game.transition_to(GamePhase::Playing)?;
        }

        self.timers.disarm(game_id);
        hand.retain(|&c| c != card);
        session.round.current_trick.push(TrickPlay { seat, card });
        let mut emits = vec![Emit::Room(ServerMsg::CardPlayed {
            game_id,
            seat,
            card,
        })];
        let mut round_scored = false;

        if session.round.current_trick.len() == PLAYERS {
            let winner = trick_winner(&session.round.current_trick, contract)?;
            let points = trick_points(&session.round.current_trick, contract);
            session.round.record_trick(winner, points)?;
            emits.push(Emit::Room(ServerMsg::TrickComplete {
                game_id,
                winner,
                points,
            }));

            if session.round.all_tricks_played() {
                self.finish_round(&mut session, &mut emits).await?;
                round_scored = true;
            } else {
                // Winner leads the next trick.
                Self::turn_to(&mut session, winner, &mut emits);
            }
        } else {
            Self::turn_to(&mut session, next_seat(seat), &mut emits);
        }

        session.bump_version();
        if round_scored {
            // finish_round already cleared (or redealt) every hand record.
            self.store.put_session(&session).await?;
        } else {
            // One atomic write: the card leaves the stored hand only if the
            // trick that consumed it is committed with it.
            self.store
                .put_session_with_hand(&session, player, &hand)
                .await?;
        }
        self.deliver(game_id, emits);
        self.schedule_turn(&session);
        Ok(())
    }

    /// Score the completed round, accumulate match points, and either end
    /// the game or deal the next round.
    async fn finish_round(
        self: &Arc<Self>,
        session: &mut GameSession,
        emits: &mut Vec<Emit>,
    ) -> Result<(), DomainError> {
        let game_id = session.game.id;
        let contract = session
            .round
            .contract
            .ok_or_else(|| DomainError::validation_other("Scoring without a contract"))?;
        let contract_team = session
            .round
            .contract_team()
            .ok_or_else(|| DomainError::validation_other("Scoring without a contract holder"))?;

        let score = calculate_round_score(
            session.round.team1_trick_points,
            session.round.team2_trick_points,
            &session.round.counted_declarations(Team::NorthSouth),
            &session.round.counted_declarations(Team::EastWest),
            contract_team,
            contract,
            session.round.doubled,
            session.round.redoubled,
        );
        let match_points = convert_to_match_points(&score, contract);
        session.game.add_match_points(Team::NorthSouth, match_points.team1);
        session.game.add_match_points(Team::EastWest, match_points.team2);
        session.round.finish();
        session.game.transition_to(GamePhase::Scoring)?;

        emits.push(Emit::Room(ServerMsg::RoundComplete {
            game_id,
            score,
            team1_match_points: session.game.team1_match_points,
            team2_match_points: session.game.team2_match_points,
        }));

        for &player in &session.game.players {
            self.store.remove_hand(game_id, player).await?;
        }

        if session.game.is_finished() {
            let winning_team = session
                .game
                .winning_team()
                .ok_or_else(|| DomainError::validation_other("Finished game without a winner"))?;
            session.game.finish()?;
            emits.push(Emit::Room(ServerMsg::GameComplete {
                game_id,
                winning_team,
            }));
            self.timers.disarm(game_id);
            self.games.save(session.game.clone()).await?;
            info!(game_id = %game_id, ?winning_team, "game complete");
        } else {
            session.game.transition_to(GamePhase::Dealing)?;
            session.start_next_round();
            self.deal_and_open_bidding(session, emits).await?;
        }
        Ok(())
    }

    /// First dealing phase: shuffle, give each seat 5 cards, stash the
    /// remaining 12, and open the auction left of the dealer.
    async fn deal_and_open_bidding(
        &self,
        session: &mut GameSession,
        emits: &mut Vec<Emit>,
    ) -> Result<(), DomainError> {
        let game_id = session.game.id;
        let mut deck = shuffle(&create_deck());
        let hands = deal_initial(&mut deck)?;
        for (seat, hand) in hands.iter().enumerate() {
            let player = session.game.player_at(seat as Seat);
            self.store.put_hand(game_id, player, hand).await?;
            emits.push(Emit::Player(
                player,
                ServerMsg::CardsDealt {
                    game_id,
                    cards: hand.clone(),
                },
            ));
        }
        self.store.put_deck(game_id, &deck).await?;

        session.game.transition_to(GamePhase::Bidding)?;
        let opener = session.first_bidder();
        Self::turn_to(session, opener, emits);
        Ok(())
    }

    /// Second dealing phase after a contract is reached: three more cards
    /// each, emptying the stashed deck.
    async fn complete_the_deal(
        &self,
        session: &mut GameSession,
        emits: &mut Vec<Emit>,
    ) -> Result<(), DomainError> {
        let game_id = session.game.id;
        let mut deck = self
            .store
            .get_deck(game_id)
            .await?
            .ok_or_else(|| DomainError::validation_other("Undealt cards missing"))?;

        let mut hands: [Vec<Card>; PLAYERS] = Default::default();
        for (seat, hand) in hands.iter_mut().enumerate() {
            let player = session.game.player_at(seat as Seat);
            *hand = self
                .store
                .get_hand(game_id, player)
                .await?
                .ok_or_else(|| DomainError::not_found(NotFoundKind::Hand, "Hand expired"))?;
        }
        deal_remaining(&mut deck, &mut hands)?;
        for (seat, hand) in hands.iter().enumerate() {
            let player = session.game.player_at(seat as Seat);
            self.store.put_hand(game_id, player, hand).await?;
            emits.push(Emit::Player(
                player,
                ServerMsg::CardsDealt {
                    game_id,
                    cards: hand.clone(),
                },
            ));
        }
        self.store.remove_deck(game_id).await?;
        Ok(())
    }

    fn turn_to(session: &mut GameSession, seat: Seat, emits: &mut Vec<Emit>) {
        session.game.current_player = seat;
        emits.push(Emit::Player(
            session.game.player_at(seat),
            ServerMsg::YourTurn {
                game_id: session.game.id,
                seat,
            },
        ));
    }

    /// Arm the turn timer for the acting seat. Bot-driven seats act
    /// immediately instead of waiting out the timeout.
    fn schedule_turn(self: &Arc<Self>, session: &GameSession) {
        if session.game.status != GameStatus::Active {
            return;
        }
        if !matches!(
            session.game.phase,
            GamePhase::Bidding | GamePhase::Declaring | GamePhase::Playing
        ) {
            return;
        }

        let game_id = session.game.id;
        let seat = session.game.current_player;
        let flow = Arc::clone(self);

        if session.bots[usize::from(seat)] {
            tokio::spawn(async move {
                if let Err(err) = flow.act_as_bot(game_id, seat).await {
                    error!(%game_id, seat, error = %err, "bot action failed");
                }
            });
            return;
        }

        let token = self.timers.arm(game_id);
        let timeout = self.turn_timeout;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(timeout) => {
                    if let Err(err) = flow.take_over_seat(game_id, seat).await {
                        error!(%game_id, seat, error = %err, "turn takeover failed");
                    }
                }
            }
        });
    }

    /// Timeout expiry: hand the seat to the bot and act on its behalf.
    async fn take_over_seat(self: &Arc<Self>, game_id: Uuid, seat: Seat) -> Result<(), AppError> {
        {
            let lock = self.lock_for(game_id);
            let _guard = lock.lock().await;

            let mut session = self.load(game_id).await?;
            // Stale timer: the seat already acted or the game moved on.
            if session.game.status != GameStatus::Active
                || session.game.current_player != seat
                || session.bots[usize::from(seat)]
            {
                return Ok(());
            }
            warn!(%game_id, seat, "turn timed out, bot taking over");
            session.bots[usize::from(seat)] = true;
            let emits = vec![Emit::Room(ServerMsg::BotTakeover { game_id, seat })];
            self.persist_and_emit(&mut session, emits).await?;
        }
        self.act_as_bot(game_id, seat).await
    }

    /// Drive one bot move for the given seat.
    async fn act_as_bot(self: &Arc<Self>, game_id: Uuid, seat: Seat) -> Result<(), AppError> {
        let session = self.load(game_id).await?;
        if session.game.status != GameStatus::Active || session.game.current_player != seat {
            return Ok(());
        }
        let player = session.game.player_at(seat);
        let hand = self
            .store
            .get_hand(game_id, player)
            .await?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Hand, "Hand expired"))?;

        match session.game.phase {
            GamePhase::Bidding => {
                let (kind, contract) = match self.bot.choose_bid(&hand, &session.round.bids)? {
                    BotBid::Pass => (BidKind::Pass, None),
                    BotBid::Contract(contract) => (BidKind::Contract, Some(contract)),
                };
                self.place_bid_as(game_id, Actor::Seat(seat), kind, contract)
                    .await
            }
            GamePhase::Declaring | GamePhase::Playing => {
                let contract = session
                    .round
                    .contract
                    .ok_or_else(|| DomainError::validation_other("No contract in play"))?;
                let card =
                    self.bot
                        .choose_card(&hand, &session.round.current_trick, contract, seat)?;
                self.play_card_as(game_id, Actor::Seat(seat), card).await
            }
            _ => Ok(()),
        }
    }
}
