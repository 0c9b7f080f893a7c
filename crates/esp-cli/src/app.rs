//! Wires the loader, the game session and the results sink together and
//! decides the process exit status.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use esp_core::AppInfo;
use esp_core::game::engine::{EngineError, GameEnd, GameState};
use esp_core::game::session::{GameSession, SessionError};
use esp_core::model::deck::DrawPile;
use tracing::{error, info, warn};

use crate::config::{ConfigError, load_deck};
use crate::results::{GameSummary, append_results_or_warn, write_summary_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Pile exhausted or quit.
    GameEnd = 0,
    WrongUsage = 1,
    CannotOpenFile = 2,
    InvalidFile = 3,
    /// Allocation failure, or the console itself failed.
    Fatal = 4,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl From<&ConfigError> for ExitStatus {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::Open { .. } => ExitStatus::CannotOpenFile,
            ConfigError::Read { .. } | ConfigError::Invalid { .. } => ExitStatus::InvalidFile,
            ConfigError::OutOfMemory(_) => ExitStatus::Fatal,
        }
    }
}

pub const USAGE: &str = "Usage: esp <config file>";

#[derive(Debug, Clone, Default)]
pub struct GameOptions {
    /// Deck file; also receives the final results.
    pub config: PathBuf,
    pub shuffle: Option<u64>,
    pub summary_json: Option<PathBuf>,
}

/// Runs one complete game against the given console.
pub fn run<R: BufRead, W: Write>(options: &GameOptions, input: &mut R, out: &mut W) -> ExitStatus {
    match run_inner(options, input, out) {
        Ok(status) => status,
        Err(err) => {
            error!(target: "esp_cli::app", error = %err, "console failure");
            ExitStatus::Fatal
        }
    }
}

fn run_inner<R: BufRead, W: Write>(
    options: &GameOptions,
    input: &mut R,
    out: &mut W,
) -> io::Result<ExitStatus> {
    let cards = match load_deck(&options.config) {
        Ok(cards) => cards,
        Err(err) => {
            warn!(target: "esp_cli::app", error = ?err, "deck file rejected");
            writeln!(out, "Error: {err}")?;
            return Ok(ExitStatus::from(&err));
        }
    };

    let pile = match options.shuffle {
        Some(seed) => DrawPile::shuffled_with_seed(cards, seed),
        None => DrawPile::new(cards),
    };
    let state = match GameState::deal(pile) {
        Ok(state) => state,
        Err(err) => return report_engine_error(&err, out),
    };

    writeln!(out, "Welcome to {}!", AppInfo::title())?;
    info!(target: "esp_cli::app", config = %options.config.display(), "game started");

    let mut session = GameSession::new(state);
    let end = match session.run(input, out) {
        Ok(end) => end,
        Err(SessionError::Engine(err)) => return report_engine_error(&err, out),
        Err(SessionError::Io(err)) => return Err(err),
    };

    if end == GameEnd::Quit {
        return Ok(ExitStatus::GameEnd);
    }

    let standings = session.state().standings();
    write!(out, "{standings}")?;
    append_results_or_warn(&options.config, &standings, out)?;

    if let Some(path) = &options.summary_json {
        let summary = GameSummary {
            reason: end,
            standings: &standings,
        };
        if let Err(err) = write_summary_json(path, &summary) {
            let message = format!("{err:#}");
            warn!(target: "esp_cli::app", error = %message, "summary not written");
        }
    }

    Ok(ExitStatus::GameEnd)
}

fn report_engine_error<W: Write>(err: &EngineError, out: &mut W) -> io::Result<ExitStatus> {
    error!(target: "esp_cli::app", error = ?err, "game aborted");
    match err {
        EngineError::OutOfMemory(_) => writeln!(out, "Error: Out of memory")?,
        other => writeln!(out, "Error: {other}")?,
    }
    Ok(ExitStatus::Fatal)
}
