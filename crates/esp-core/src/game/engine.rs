//! Game state plus the operations that move cards: play, draw, swap,
//! challenge and the refills that close a round.

use crate::game::command::{ChallengeAxis, Command, TurnView};
use crate::model::card::Card;
use crate::model::deck::DrawPile;
use crate::model::player::{Player, PlayerId};
use crate::model::round::{PlayRecord, RoundState};
use crate::model::score::Standings;
use core::fmt;
use serde::Serialize;
use std::collections::TryReserveError;
use thiserror::Error;
use tracing::{debug, info};

pub const OPENING_HAND_SIZE: usize = 6;
pub const LOSER_DRAW: usize = 2;
pub const REFILL_DRAW: usize = 6;
pub const EMPTY_HAND_BONUS: u32 = 10;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("out of memory")]
    OutOfMemory(#[from] TryReserveError),
    #[error("dealing needs {needed} cards but the draw pile holds {available}")]
    NotEnoughCards { needed: usize, available: usize },
    #[error("{player} does not hold {card}")]
    CardNotInHand { player: PlayerId, card: Card },
    #[error("{player} has no card at index {index}")]
    IndexOutOfBounds { player: PlayerId, index: usize },
    #[error("there is no play to challenge")]
    NothingToChallenge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    PileExhausted,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    RoundEnded(ChallengeReport),
    GameOver(GameEnd),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeReport {
    pub challenger: PlayerId,
    pub declarer: PlayerId,
    pub axis: ChallengeAxis,
    pub declared: Card,
    pub actual: Card,
    /// True when the declaration was caught as a bluff.
    pub successful: bool,
    pub awarded_to: PlayerId,
    pub points: u32,
    pub bonus: u32,
    pub loser: PlayerId,
}

impl fmt::Display for ChallengeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.successful {
            writeln!(
                f,
                "Challenge successful: {}'s {} does not match the real card {}.",
                self.declared, self.axis, self.actual
            )?;
        } else {
            writeln!(
                f,
                "Challenge failed: {}'s {} matches the real card {}.",
                self.declared, self.axis, self.actual
            )?;
        }
        writeln!(f, "{} gets {} points.", self.awarded_to, self.points)?;
        if self.bonus > 0 {
            writeln!(
                f,
                "{} gets {} bonus points (last card).",
                self.awarded_to, self.bonus
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    players: [Player; 2],
    pile: DrawPile,
    discard: Vec<Card>,
    round: RoundState,
    last_round_loser: PlayerId,
}

impl GameState {
    /// Deals the opening hands alternately, player 1 first, and sorts them.
    pub fn deal(mut pile: DrawPile) -> Result<Self, EngineError> {
        let needed = OPENING_HAND_SIZE * 2;
        if pile.len() < needed {
            return Err(EngineError::NotEnoughCards {
                needed,
                available: pile.len(),
            });
        }

        let mut players = [Player::new(), Player::new()];
        for seat in 0..needed {
            let Some(card) = pile.draw() else {
                break;
            };
            players[seat % 2].hand.append(card)?;
        }
        for player in &mut players {
            player.hand.sort();
        }

        Ok(Self {
            players,
            pile,
            discard: Vec::new(),
            round: RoundState::new(1, PlayerId::One),
            last_round_loser: PlayerId::One,
        })
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn pile(&self) -> &DrawPile {
        &self.pile
    }

    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn last_round_loser(&self) -> PlayerId {
        self.last_round_loser
    }

    pub fn current_player(&self) -> PlayerId {
        self.round.current_player()
    }

    /// Cards in the pile, both hands and the discard.
    pub fn total_cards(&self) -> usize {
        self.pile.len()
            + self.discard.len()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    pub fn turn_view(&self) -> TurnView<'_> {
        let actor = self.current_player();
        TurnView {
            hand: &self.player(actor).hand,
            opponent_hand: &self.player(actor.opponent()).hand,
            round: &self.round,
        }
    }

    pub fn standings(&self) -> Standings {
        Standings::from_totals([
            self.player(PlayerId::One).points,
            self.player(PlayerId::Two).points,
        ])
    }

    /// Executes a validated command for the current player.
    pub fn apply(&mut self, command: Command) -> Result<TurnOutcome, EngineError> {
        let actor = self.current_player();
        match command {
            Command::Quit => {
                info!(target: "esp_core::engine", player = %actor, "quit");
                Ok(TurnOutcome::GameOver(GameEnd::Quit))
            }
            Command::Draw => {
                if !self.draw_cards(actor, 1)? {
                    return Ok(TurnOutcome::GameOver(GameEnd::PileExhausted));
                }
                self.round.record_draw();
                self.round.pass_turn();
                Ok(TurnOutcome::Continue)
            }
            Command::Play { actual, declared } => {
                self.play(actor, actual, declared)?;
                self.round.pass_turn();
                Ok(TurnOutcome::Continue)
            }
            Command::Swap { card, index } => {
                self.swap(actor, card, index)?;
                self.round.record_swap();
                self.round.pass_turn();
                Ok(TurnOutcome::Continue)
            }
            Command::Challenge(axis) => {
                let report = self.challenge(actor, axis)?;
                Ok(TurnOutcome::RoundEnded(report))
            }
        }
    }

    fn play(&mut self, actor: PlayerId, actual: Card, declared: Card) -> Result<(), EngineError> {
        self.discard.try_reserve(1)?;
        let card = self.players[actor.index()]
            .hand
            .remove(actual)
            .ok_or(EngineError::CardNotInHand {
                player: actor,
                card: actual,
            })?;
        self.discard.push(card);
        self.round.record_play(PlayRecord {
            declarer: actor,
            declared,
            actual,
        });
        let bluff = declared != actual;
        debug!(
            target: "esp_core::engine",
            player = %actor,
            %declared,
            bluff,
            plays = self.round.plays(),
            "card played"
        );
        Ok(())
    }

    /// Moves `count` cards from the pile to `player` and sorts the hand.
    /// Returns `false` when the pile runs out first.
    fn draw_cards(&mut self, player: PlayerId, count: usize) -> Result<bool, EngineError> {
        let hand = &mut self.players[player.index()].hand;
        for _ in 0..count {
            let Some(card) = self.pile.peek() else {
                debug!(target: "esp_core::engine", player = %player, "draw pile exhausted");
                return Ok(false);
            };
            hand.append(card)?;
            self.pile.draw();
        }
        hand.sort();
        debug!(
            target: "esp_core::engine",
            player = %player,
            count,
            remaining = self.pile.len(),
            "cards drawn"
        );
        Ok(true)
    }

    /// Exchanges `card` from the actor's hand with the opponent's card at
    /// `index`. Every check and allocation happens before the first card
    /// moves, so the exchange is applied whole or not at all.
    fn swap(&mut self, actor: PlayerId, card: Card, index: usize) -> Result<(), EngineError> {
        let opponent = actor.opponent();
        if !self.player(actor).hand.contains(card) {
            return Err(EngineError::CardNotInHand {
                player: actor,
                card,
            });
        }
        if index >= self.player(opponent).hand.len() {
            return Err(EngineError::IndexOutOfBounds {
                player: opponent,
                index,
            });
        }
        self.players[actor.index()].hand.reserve(1)?;
        self.players[opponent.index()].hand.reserve(1)?;

        let [one, two] = &mut self.players;
        let (own, other) = match actor {
            PlayerId::One => (&mut one.hand, &mut two.hand),
            PlayerId::Two => (&mut two.hand, &mut one.hand),
        };
        let given = own.remove(card).ok_or(EngineError::CardNotInHand {
            player: actor,
            card,
        })?;
        let taken = other.remove_at(index).ok_or(EngineError::IndexOutOfBounds {
            player: opponent,
            index,
        })?;
        own.append(taken)?;
        other.append(given)?;
        own.sort();
        other.sort();

        debug!(target: "esp_core::engine", player = %actor, %given, %taken, "cards swapped");
        Ok(())
    }

    fn challenge(
        &mut self,
        challenger: PlayerId,
        axis: ChallengeAxis,
    ) -> Result<ChallengeReport, EngineError> {
        let points = self.round.plays();
        let record = self
            .round
            .record_challenge()
            .ok_or(EngineError::NothingToChallenge)?;
        let declarer = record.declarer;

        let matched = axis.matches(record.declared, record.actual);
        let (awarded_to, loser, bonus) = if matched {
            let bonus = if self.player(declarer).hand.is_empty() {
                EMPTY_HAND_BONUS
            } else {
                0
            };
            (declarer, challenger, bonus)
        } else {
            (challenger, declarer, 0)
        };

        self.players[awarded_to.index()].award(points + bonus);
        self.last_round_loser = loser;

        let report = ChallengeReport {
            challenger,
            declarer,
            axis,
            declared: record.declared,
            actual: record.actual,
            successful: !matched,
            awarded_to,
            points,
            bonus,
            loser,
        };
        info!(
            target: "esp_core::engine",
            challenger = %challenger,
            %axis,
            successful = report.successful,
            awarded_to = %awarded_to,
            points = points + bonus,
            "challenge resolved"
        );
        Ok(report)
    }

    /// Post-challenge refills: the loser draws two, an empty-handed opponent
    /// draws six, then the loser opens the next round. Returns the game end
    /// when the pile cannot cover a refill.
    pub fn finish_round(&mut self) -> Result<Option<GameEnd>, EngineError> {
        let loser = self.last_round_loser;
        if !self.draw_cards(loser, LOSER_DRAW)? {
            return Ok(Some(GameEnd::PileExhausted));
        }
        let other = loser.opponent();
        if self.player(other).hand.is_empty() && !self.draw_cards(other, REFILL_DRAW)? {
            return Ok(Some(GameEnd::PileExhausted));
        }

        self.round = RoundState::new(self.round.number() + 1, loser);
        info!(
            target: "esp_core::engine",
            round = self.round.number(),
            opener = %loser,
            "round started"
        );
        Ok(None)
    }
}
