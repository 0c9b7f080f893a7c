use crate::model::card::Card;
use crate::model::player::PlayerId;
use crate::model::spice::Spice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastAction {
    Play,
    Draw,
    Swap,
    Challenge,
}

/// The most recent play: what was announced and what actually left the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayRecord {
    pub declarer: PlayerId,
    pub declared: Card,
    pub actual: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    number: u32,
    starting_player: PlayerId,
    current_player: PlayerId,
    plays: u32,
    last_play: Option<PlayRecord>,
    spice: Option<Spice>,
    last_action: Option<LastAction>,
}

impl RoundState {
    pub fn new(number: u32, starting_player: PlayerId) -> Self {
        Self {
            number,
            starting_player,
            current_player: starting_player,
            plays: 0,
            last_play: None,
            spice: None,
            last_action: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn starting_player(&self) -> PlayerId {
        self.starting_player
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn plays(&self) -> u32 {
        self.plays
    }

    pub fn last_play(&self) -> Option<&PlayRecord> {
        self.last_play.as_ref()
    }

    pub fn declared(&self) -> Option<Card> {
        self.last_play.map(|play| play.declared)
    }

    /// Spice fixed by the first play of the round.
    pub fn spice(&self) -> Option<Spice> {
        self.spice
    }

    pub fn last_action(&self) -> Option<LastAction> {
        self.last_action
    }

    pub fn is_first_play(&self) -> bool {
        self.plays == 0
    }

    /// Only a play can be challenged, and only straight after it was made.
    pub fn can_challenge(&self) -> bool {
        self.plays > 0 && self.last_action == Some(LastAction::Play)
    }

    pub fn record_play(&mut self, record: PlayRecord) {
        if self.spice.is_none() {
            self.spice = Some(record.declared.spice);
        }
        self.last_play = Some(record);
        self.plays += 1;
        self.last_action = Some(LastAction::Play);
    }

    pub fn record_draw(&mut self) {
        self.last_action = Some(LastAction::Draw);
    }

    pub fn record_swap(&mut self) {
        self.last_action = Some(LastAction::Swap);
    }

    /// Closes the round's bluff memory and returns the play under challenge.
    pub fn record_challenge(&mut self) -> Option<PlayRecord> {
        self.last_action = Some(LastAction::Challenge);
        self.last_play.take()
    }

    pub fn pass_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }
}
