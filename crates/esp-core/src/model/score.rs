use crate::model::player::PlayerId;
use core::fmt;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    pub player: PlayerId,
    pub points: u32,
}

/// Final totals, highest first. A tie keeps player 1 first and makes both
/// players winners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standings {
    scores: [PlayerScore; 2],
    winners: Vec<PlayerId>,
}

impl Standings {
    pub fn from_totals(totals: [u32; 2]) -> Self {
        let one = PlayerScore {
            player: PlayerId::One,
            points: totals[PlayerId::One.index()],
        };
        let two = PlayerScore {
            player: PlayerId::Two,
            points: totals[PlayerId::Two.index()],
        };

        let scores = if one.points >= two.points {
            [one, two]
        } else {
            [two, one]
        };
        let winners = if one.points == two.points {
            PlayerId::BOTH.to_vec()
        } else {
            vec![scores[0].player]
        };

        Self { scores, winners }
    }

    pub fn scores(&self) -> &[PlayerScore; 2] {
        &self.scores
    }

    pub fn winners(&self) -> &[PlayerId] {
        &self.winners
    }

    pub fn is_tie(&self) -> bool {
        self.winners.len() == 2
    }
}

impl fmt::Display for Standings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for score in &self.scores {
            writeln!(f, "{}: {} points", score.player, score.points)?;
        }
        writeln!(f)?;
        for winner in &self.winners {
            writeln!(f, "Congratulations! {winner} wins the game!")?;
        }
        Ok(())
    }
}
