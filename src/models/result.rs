//! Score, GameResult and Penalty: what a submitted match result looks like.

use crate::config::{MAX_SETS_COUNT, UNPLAYED_SET_AWAY_SCORE, UNPLAYED_SET_HOME_SCORE};
use serde::{Deserialize, Serialize};

/// Which side of a game something refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// A home/away pair of numbers: sets for the game score, points for a set score.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u16,
    pub away: u16,
    /// Set (or game) awarded administratively instead of being played.
    #[serde(default)]
    pub is_technical_defeat: bool,
}

impl Score {
    pub fn new(home: u16, away: u16) -> Self {
        Self {
            home,
            away,
            is_technical_defeat: false,
        }
    }

    pub fn technical_defeat(home: u16, away: u16) -> Self {
        Self {
            home,
            away,
            is_technical_defeat: true,
        }
    }

    /// The sentinel used for sets 4 and 5 when the match ended earlier.
    pub fn unplayed() -> Self {
        Self::new(UNPLAYED_SET_HOME_SCORE, UNPLAYED_SET_AWAY_SCORE)
    }

    pub fn is_unplayed(&self) -> bool {
        self.home == UNPLAYED_SET_HOME_SCORE && self.away == UNPLAYED_SET_AWAY_SCORE
    }

    /// None on a draw (only possible for unplayed or malformed scores).
    pub fn winner(&self) -> Option<Side> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn max(&self) -> u16 {
        self.home.max(self.away)
    }

    pub fn min(&self) -> u16 {
        self.home.min(self.away)
    }

    pub fn for_side(&self, side: Side) -> u16 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    /// Same score seen from the other team's perspective.
    pub fn transpose(&self) -> Self {
        Self {
            home: self.away,
            away: self.home,
            is_technical_defeat: self.is_technical_defeat,
        }
    }
}

/// Points deducted from one team's standings total.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub side: Side,
    pub amount: u16,
    #[serde(default)]
    pub description: String,
}

/// Full result of a game: sets score, every set's points and an optional penalty.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// Sets won by each side. `is_technical_defeat` here marks the whole game.
    pub game_score: Score,
    /// Sets 1-3 must be played; sets 4-5 are `Score::unplayed()` when not needed.
    pub set_scores: [Score; MAX_SETS_COUNT],
    #[serde(default)]
    pub penalty: Option<Penalty>,
}

impl GameResult {
    pub fn new(game_score: Score, set_scores: [Score; MAX_SETS_COUNT]) -> Self {
        Self {
            game_score,
            set_scores,
            penalty: None,
        }
    }

    /// Result with nothing played yet (0:0 and every set unplayed).
    pub fn empty() -> Self {
        Self::new(Score::unplayed(), [Score::unplayed(); MAX_SETS_COUNT])
    }

    pub fn with_penalty(mut self, penalty: Penalty) -> Self {
        self.penalty = Some(penalty);
        self
    }

    pub fn is_technical_defeat(&self) -> bool {
        self.game_score.is_technical_defeat
    }

    /// True when no set has been played and the sets score is still 0:0.
    /// A technical defeat is always a result, whatever its scores.
    pub fn has_no_sets_played(&self) -> bool {
        !self.game_score.is_technical_defeat
            && self.game_score.is_unplayed()
            && self.set_scores.iter().all(Score::is_unplayed)
    }

    pub fn penalty_for(&self, side: Side) -> u16 {
        match &self.penalty {
            Some(p) if p.side == side => p.amount,
            _ => 0,
        }
    }

    /// Result seen from the away team's perspective; penalty follows its team.
    pub fn transpose(&self) -> Self {
        let mut set_scores = self.set_scores;
        for s in &mut set_scores {
            *s = s.transpose();
        }
        Self {
            game_score: self.game_score.transpose(),
            set_scores,
            penalty: self.penalty.clone().map(|p| Penalty {
                side: p.side.opposite(),
                ..p
            }),
        }
    }
}
