//! Turns one line of player input into a [`Command`], or the first rule it
//! breaks.
//!
//! Checks run in a fixed order and stop at the first failure: keyword,
//! parameter count, timing, card format, possession, play legality,
//! challenge type, swap bounds. `quit` is accepted as soon as its keyword
//! and parameter count are valid.

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::round::RoundState;
use core::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeAxis {
    Spice,
    Value,
}

impl ChallengeAxis {
    pub fn matches(self, declared: Card, actual: Card) -> bool {
        match self {
            ChallengeAxis::Spice => declared.matches_spice(actual),
            ChallengeAxis::Value => declared.matches_value(actual),
        }
    }
}

impl fmt::Display for ChallengeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeAxis::Spice => f.write_str("spice"),
            ChallengeAxis::Value => f.write_str("value"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Draw,
    Play { actual: Card, declared: Card },
    Challenge(ChallengeAxis),
    Swap { card: Card, index: usize },
}

/// Why a line was refused. The `Display` text is what the player sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Please enter a valid command!")]
    UnknownCommand,
    #[error("Please enter the correct number of parameters!")]
    WrongParameterCount,
    #[error("Please enter a command you can use at the moment!")]
    NotUsableNow,
    #[error("Please enter the cards in the correct format!")]
    InvalidCardFormat,
    #[error("Please enter a card in your hand cards!")]
    CardNotInHand,
    #[error("Please enter a valid VALUE!")]
    InvalidValue,
    #[error("Please enter a valid SPICE!")]
    InvalidSpice,
    #[error("Please choose SPICE or VALUE!")]
    InvalidChallengeType,
    #[error("Index out of bounds!")]
    IndexOutOfBounds,
}

/// What the validator may look at for the acting player.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    pub hand: &'a Hand,
    pub opponent_hand: &'a Hand,
    pub round: &'a RoundState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Quit,
    Draw,
    Play,
    Challenge,
    Swap,
}

impl Keyword {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "quit" => Some(Keyword::Quit),
            "draw" => Some(Keyword::Draw),
            "play" => Some(Keyword::Play),
            "challenge" => Some(Keyword::Challenge),
            "swap" => Some(Keyword::Swap),
            _ => None,
        }
    }

    const fn arity(self) -> usize {
        match self {
            Keyword::Quit | Keyword::Draw => 0,
            Keyword::Challenge => 1,
            Keyword::Play | Keyword::Swap => 2,
        }
    }
}

/// Highest value that may open a run.
pub const MAX_OPENING_VALUE: u8 = 3;

pub fn parse_command(line: &str, view: &TurnView<'_>) -> Result<Command, Rejection> {
    let normalized = line.to_ascii_lowercase();
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let (first, params) = tokens.split_first().ok_or(Rejection::UnknownCommand)?;
    let keyword = Keyword::from_token(first).ok_or(Rejection::UnknownCommand)?;

    if params.len() != keyword.arity() {
        return Err(Rejection::WrongParameterCount);
    }
    if keyword == Keyword::Quit {
        return Ok(Command::Quit);
    }

    check_timing(keyword, view)?;

    match keyword {
        Keyword::Quit => Ok(Command::Quit),
        Keyword::Draw => Ok(Command::Draw),
        Keyword::Play => parse_play(params[0], params[1], view),
        Keyword::Challenge => parse_challenge(params[0]),
        Keyword::Swap => parse_swap(params[0], params[1], view),
    }
}

fn check_timing(keyword: Keyword, view: &TurnView<'_>) -> Result<(), Rejection> {
    let usable = match keyword {
        Keyword::Challenge => view.round.can_challenge(),
        Keyword::Play | Keyword::Draw => !view.opponent_hand.is_empty(),
        Keyword::Quit | Keyword::Swap => true,
    };
    if usable {
        Ok(())
    } else {
        Err(Rejection::NotUsableNow)
    }
}

fn parse_card(token: &str) -> Result<Card, Rejection> {
    token.parse().map_err(|_| Rejection::InvalidCardFormat)
}

fn parse_play(actual: &str, declared: &str, view: &TurnView<'_>) -> Result<Command, Rejection> {
    let actual = parse_card(actual)?;
    let declared = parse_card(declared)?;

    if !view.hand.contains(actual) {
        return Err(Rejection::CardNotInHand);
    }
    check_declaration(declared, view.round)?;

    Ok(Command::Play { actual, declared })
}

fn check_declaration(declared: Card, round: &RoundState) -> Result<(), Rejection> {
    let previous = match round.declared() {
        Some(previous) if !round.is_first_play() => previous,
        _ => {
            return if declared.value <= MAX_OPENING_VALUE {
                Ok(())
            } else {
                Err(Rejection::InvalidValue)
            };
        }
    };

    let value_ok = if previous.value == Card::MAX_VALUE {
        (Card::MIN_VALUE..=MAX_OPENING_VALUE).contains(&declared.value)
    } else {
        declared.value > previous.value
    };
    if !value_ok {
        return Err(Rejection::InvalidValue);
    }

    if round.spice() != Some(declared.spice) {
        return Err(Rejection::InvalidSpice);
    }
    Ok(())
}

fn parse_challenge(axis: &str) -> Result<Command, Rejection> {
    match axis {
        "spice" => Ok(Command::Challenge(ChallengeAxis::Spice)),
        "value" => Ok(Command::Challenge(ChallengeAxis::Value)),
        _ => Err(Rejection::InvalidChallengeType),
    }
}

fn parse_swap(card: &str, index: &str, view: &TurnView<'_>) -> Result<Command, Rejection> {
    let card = parse_card(card)?;
    if !view.hand.contains(card) {
        return Err(Rejection::CardNotInHand);
    }

    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Rejection::IndexOutOfBounds);
    }
    let index: usize = index.parse().map_err(|_| Rejection::IndexOutOfBounds)?;
    if index >= view.opponent_hand.len() {
        return Err(Rejection::IndexOutOfBounds);
    }

    Ok(Command::Swap { card, index })
}

#[cfg(test)]
mod tests {
    use super::{ChallengeAxis, Command, Rejection, TurnView, parse_command};
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::player::PlayerId;
    use crate::model::round::{PlayRecord, RoundState};

    fn card(token: &str) -> Card {
        token.parse().unwrap()
    }

    fn hand(tokens: &[&str]) -> Hand {
        Hand::with_cards(tokens.iter().map(|t| card(t)).collect())
    }

    struct Fixture {
        hand: Hand,
        opponent: Hand,
        round: RoundState,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                hand: hand(&["1_c", "2_c", "7_p", "10_w"]),
                opponent: hand(&["3_c", "4_p", "5_w"]),
                round: RoundState::new(1, PlayerId::One),
            }
        }

        fn after_play(declared: &str) -> Self {
            let mut fixture = Self::new();
            fixture.round.record_play(PlayRecord {
                declarer: PlayerId::Two,
                declared: card(declared),
                actual: card("9_p"),
            });
            fixture
        }

        fn parse(&self, line: &str) -> Result<Command, Rejection> {
            let view = TurnView {
                hand: &self.hand,
                opponent_hand: &self.opponent,
                round: &self.round,
            };
            parse_command(line, &view)
        }
    }

    #[test]
    fn unknown_or_empty_lines_are_invalid_commands() {
        let fixture = Fixture::new();
        assert_eq!(fixture.parse("dance"), Err(Rejection::UnknownCommand));
        assert_eq!(fixture.parse(""), Err(Rejection::UnknownCommand));
        assert_eq!(fixture.parse("   "), Err(Rejection::UnknownCommand));
    }

    #[test]
    fn input_is_case_normalized_and_left_trimmed() {
        let fixture = Fixture::new();
        assert_eq!(fixture.parse("   DRAW"), Ok(Command::Draw));
        assert_eq!(
            fixture.parse("Play 1_C 2_C"),
            Ok(Command::Play {
                actual: card("1_c"),
                declared: card("2_c"),
            })
        );
    }

    #[test]
    fn arity_is_checked_per_command() {
        let fixture = Fixture::after_play("1_c");
        assert_eq!(fixture.parse("quit now"), Err(Rejection::WrongParameterCount));
        assert_eq!(fixture.parse("draw 1_c"), Err(Rejection::WrongParameterCount));
        assert_eq!(fixture.parse("challenge"), Err(Rejection::WrongParameterCount));
        assert_eq!(fixture.parse("play 1_c"), Err(Rejection::WrongParameterCount));
        assert_eq!(fixture.parse("swap 1_c 0 1"), Err(Rejection::WrongParameterCount));
    }

    #[test]
    fn quit_skips_timing_checks() {
        let mut fixture = Fixture::new();
        fixture.opponent = Hand::new();
        assert_eq!(fixture.parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn challenge_needs_a_preceding_play() {
        let fixture = Fixture::new();
        assert_eq!(fixture.parse("challenge value"), Err(Rejection::NotUsableNow));

        let mut drawn = Fixture::after_play("1_c");
        drawn.round.record_draw();
        assert_eq!(drawn.parse("challenge value"), Err(Rejection::NotUsableNow));

        let mut swapped = Fixture::after_play("1_c");
        swapped.round.record_swap();
        assert_eq!(swapped.parse("challenge spice"), Err(Rejection::NotUsableNow));

        let played = Fixture::after_play("1_c");
        assert_eq!(
            played.parse("challenge spice"),
            Ok(Command::Challenge(ChallengeAxis::Spice))
        );
    }

    #[test]
    fn timing_is_checked_before_challenge_type() {
        let fixture = Fixture::new();
        assert_eq!(fixture.parse("challenge colour"), Err(Rejection::NotUsableNow));
        let played = Fixture::after_play("1_c");
        assert_eq!(played.parse("challenge colour"), Err(Rejection::InvalidChallengeType));
    }

    #[test]
    fn play_and_draw_blocked_when_opponent_has_no_cards() {
        let mut fixture = Fixture::after_play("1_c");
        fixture.opponent = Hand::new();
        assert_eq!(fixture.parse("draw"), Err(Rejection::NotUsableNow));
        assert_eq!(fixture.parse("play 2_c 2_c"), Err(Rejection::NotUsableNow));
        assert_eq!(
            fixture.parse("challenge value"),
            Ok(Command::Challenge(ChallengeAxis::Value))
        );
    }

    #[test]
    fn card_format_checked_before_possession() {
        let fixture = Fixture::new();
        assert_eq!(fixture.parse("play 1_x 2_c"), Err(Rejection::InvalidCardFormat));
        assert_eq!(fixture.parse("play 1_c 02_c"), Err(Rejection::InvalidCardFormat));
        assert_eq!(fixture.parse("play +1_c 2_c"), Err(Rejection::InvalidCardFormat));
        assert_eq!(fixture.parse("play 1_c 11_c"), Err(Rejection::InvalidCardFormat));
        assert_eq!(fixture.parse("play 3_c 99_z"), Err(Rejection::InvalidCardFormat));
        assert_eq!(fixture.parse("play 3_c 2_c"), Err(Rejection::CardNotInHand));
    }

    #[test]
    fn opening_declaration_must_be_low() {
        let fixture = Fixture::new();
        assert_eq!(fixture.parse("play 10_w 4_c"), Err(Rejection::InvalidValue));
        assert!(fixture.parse("play 10_w 3_p").is_ok());
    }

    #[test]
    fn declarations_must_ascend_in_round_spice() {
        let fixture = Fixture::after_play("4_c");
        assert_eq!(fixture.parse("play 1_c 4_c"), Err(Rejection::InvalidValue));
        assert_eq!(fixture.parse("play 1_c 3_c"), Err(Rejection::InvalidValue));
        assert_eq!(fixture.parse("play 1_c 5_p"), Err(Rejection::InvalidSpice));
        assert_eq!(
            fixture.parse("play 7_p 5_c"),
            Ok(Command::Play {
                actual: card("7_p"),
                declared: card("5_c"),
            })
        );
    }

    #[test]
    fn ten_restarts_the_run() {
        let fixture = Fixture::after_play("10_c");
        assert_eq!(fixture.parse("play 1_c 4_c"), Err(Rejection::InvalidValue));
        assert!(fixture.parse("play 1_c 1_c").is_ok());
        assert!(fixture.parse("play 1_c 3_c").is_ok());
    }

    #[test]
    fn swap_checks_card_then_index() {
        let fixture = Fixture::new();
        assert_eq!(fixture.parse("swap 1_q 0"), Err(Rejection::InvalidCardFormat));
        assert_eq!(fixture.parse("swap 3_c 0"), Err(Rejection::CardNotInHand));
        assert_eq!(fixture.parse("swap 1_c 3"), Err(Rejection::IndexOutOfBounds));
        assert_eq!(fixture.parse("swap 1_c -1"), Err(Rejection::IndexOutOfBounds));
        assert_eq!(fixture.parse("swap 1_c x"), Err(Rejection::IndexOutOfBounds));
        assert_eq!(fixture.parse("swap 1_c +0"), Err(Rejection::IndexOutOfBounds));
        assert_eq!(
            fixture.parse("swap 1_c 2"),
            Ok(Command::Swap {
                card: card("1_c"),
                index: 2,
            })
        );
    }

    #[test]
    fn rejection_messages_are_player_facing() {
        assert_eq!(Rejection::UnknownCommand.to_string(), "Please enter a valid command!");
        assert_eq!(Rejection::IndexOutOfBounds.to_string(), "Index out of bounds!");
        assert_eq!(ChallengeAxis::Value.to_string(), "value");
    }
}
