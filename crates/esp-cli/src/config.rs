use std::collections::TryReserveError;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use esp_core::game::engine::OPENING_HAND_SIZE;
use esp_core::model::card::Card;
use thiserror::Error;
use tracing::debug;

/// Literal first line of every deck file.
pub const HEADER: &str = "ESP";
pub const MIN_CARDS: usize = OPENING_HAND_SIZE * 2;

/// Problems with the deck text itself, independent of where it came from.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("first line must be `{}`", HEADER)]
    MissingHeader,
    #[error("found {found} cards, at least {} are needed to deal", MIN_CARDS)]
    TooFewCards { found: usize },
    #[error("out of memory while reading cards")]
    OutOfMemory(#[from] TryReserveError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot open file: {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid file: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid file: {}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: DeckError,
    },
    #[error("Out of memory")]
    OutOfMemory(#[source] TryReserveError),
}

/// Loads the ordered draw pile from a deck file.
pub fn load_deck(path: impl AsRef<Path>) -> Result<Vec<Card>, ConfigError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| ConfigError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let cards = parse_deck(&text).map_err(|source| match source {
        DeckError::OutOfMemory(err) => ConfigError::OutOfMemory(err),
        source => ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        },
    })?;
    debug!(target: "esp_cli::config", path = %path.display(), cards = cards.len(), "deck loaded");
    Ok(cards)
}

/// Reads cards after the header until the first token that is not a card.
/// Anything after that token, such as appended results, is ignored.
pub fn parse_deck(text: &str) -> Result<Vec<Card>, DeckError> {
    let (first_line, rest) = text.split_once('\n').ok_or(DeckError::MissingHeader)?;
    if first_line.strip_suffix('\r').unwrap_or(first_line) != HEADER {
        return Err(DeckError::MissingHeader);
    }

    let mut cards = Vec::new();
    for token in rest.split_whitespace() {
        let Ok(card) = token.parse::<Card>() else {
            debug!(target: "esp_cli::config", token, "deck ends at non-card token");
            break;
        };
        cards.try_reserve(1)?;
        cards.push(card);
    }

    if cards.len() < MIN_CARDS {
        return Err(DeckError::TooFewCards { found: cards.len() });
    }
    Ok(cards)
}
