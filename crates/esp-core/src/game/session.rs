//! The round and turn loop. Reads one line per turn, validates it, applies it
//! and reacts to the outcome until the game ends.

use crate::game::command::{Command, parse_command};
use crate::game::engine::{EngineError, GameEnd, GameState, TurnOutcome};
use crate::model::player::PlayerId;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, info};

const ROUND_BANNER: &str = "\n-------------------\nROUND START\n-------------------";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug)]
pub struct GameSession {
    state: GameState,
}

impl GameSession {
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Plays rounds until the pile runs dry or a player quits. A closed input
    /// stream counts as `quit`.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<GameEnd, SessionError> {
        loop {
            writeln!(out, "{ROUND_BANNER}")?;
            if let Some(end) = self.play_round(input, out)? {
                info!(target: "esp_core::session", reason = ?end, "game over");
                return Ok(end);
            }
            if let Some(end) = self.state.finish_round()? {
                info!(target: "esp_core::session", reason = ?end, "game over after refill");
                return Ok(end);
            }
        }
    }

    /// Returns `None` when a challenge closed the round.
    fn play_round<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Option<GameEnd>, SessionError> {
        loop {
            if self.state.pile().is_empty() {
                return Ok(Some(GameEnd::PileExhausted));
            }

            self.write_turn_header(out)?;
            let command = self.read_command(input, out)?.unwrap_or(Command::Quit);

            match self.state.apply(command)? {
                TurnOutcome::Continue => {}
                TurnOutcome::RoundEnded(report) => {
                    write!(out, "{report}")?;
                    return Ok(None);
                }
                TurnOutcome::GameOver(end) => return Ok(Some(end)),
            }
        }
    }

    fn write_turn_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let actor = self.state.current_player();
        let round = self.state.round();

        writeln!(out)?;
        writeln!(out, "{actor}:")?;
        write!(out, "    latest played card:")?;
        if let Some(declared) = round.declared() {
            write!(out, " {declared}")?;
        }
        if self.state.player(actor.opponent()).hand.is_empty() {
            write!(out, " LAST CARD")?;
        }
        writeln!(out)?;
        writeln!(out, "    cards played this round: {}", round.plays())?;

        write!(out, "    hand cards:")?;
        for card in self.state.player(actor).hand.iter() {
            write!(out, " {card}")?;
        }
        writeln!(out)
    }

    /// Prompts until a line passes validation. `None` means end of input.
    /// Bytes that are not UTF-8 reach the validator as replacement characters.
    fn read_command<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<Option<Command>> {
        let actor = self.state.current_player();
        let mut raw = Vec::new();
        loop {
            write_prompt(out, actor)?;
            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                debug!(target: "esp_core::session", player = %actor, "input closed");
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&raw);

            match parse_command(&line, &self.state.turn_view()) {
                Ok(command) => return Ok(Some(command)),
                Err(rejection) => {
                    debug!(
                        target: "esp_core::session",
                        player = %actor,
                        ?rejection,
                        line = line.trim_end(),
                        "command rejected"
                    );
                    writeln!(out, "{rejection}")?;
                }
            }
        }
    }
}

fn write_prompt<W: Write>(out: &mut W, player: PlayerId) -> io::Result<()> {
    write!(out, "P{} > ", player.number())?;
    out.flush()
}
