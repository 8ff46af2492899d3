//! Scoring constants and the configurable competition points table.
//!
//! The defaults follow indoor volleyball rules; leagues with other formats load
//! their own `ScoringConfig` (the web binary reads one from `SCORING_CONFIG`).

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sets stored per result (best of five).
pub const MAX_SETS_COUNT: usize = 5;
/// Sets 1..=3 must always be played.
pub const REQUIRED_SETS_COUNT: usize = 3;
/// Index of the deciding set.
pub const FIFTH_SET_INDEX: usize = 4;

pub const SETS_COUNT_TO_WIN: u16 = 3;
pub const SET_POINTS_MIN_VALUE_TO_WIN: u16 = 25;
pub const SET_POINTS_MIN_DELTA_TO_WIN: u16 = 2;
pub const FIFTH_SET_POINTS_MIN_VALUE_TO_WIN: u16 = 15;

pub const TECHNICAL_DEFEAT_SETS_WINNER_SCORE: u16 = 3;
pub const TECHNICAL_DEFEAT_SETS_LOSER_SCORE: u16 = 0;
pub const TECHNICAL_DEFEAT_SET_WINNER_SCORE: u16 = 25;
pub const TECHNICAL_DEFEAT_SET_LOSER_SCORE: u16 = 0;

pub const UNPLAYED_SET_HOME_SCORE: u16 = 0;
pub const UNPLAYED_SET_AWAY_SCORE: u16 = 0;

/// Competition points for one final sets score, e.g. 3:2 -> 2 for the winner, 1 for the loser.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OutcomePoints {
    pub winner_sets: u16,
    pub loser_sets: u16,
    pub winner_points: i32,
    pub loser_points: i32,
}

/// Lookup from a final sets score to competition points.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsTable {
    outcomes: Vec<OutcomePoints>,
}

impl PointsTable {
    pub fn new(outcomes: Vec<OutcomePoints>) -> Self {
        Self { outcomes }
    }

    /// (winner points, loser points), or None when the table has no row for this score.
    pub fn lookup(&self, winner_sets: u16, loser_sets: u16) -> Option<(i32, i32)> {
        self.outcomes
            .iter()
            .find(|o| o.winner_sets == winner_sets && o.loser_sets == loser_sets)
            .map(|o| (o.winner_points, o.loser_points))
    }

    pub fn outcomes(&self) -> &[OutcomePoints] {
        &self.outcomes
    }
}

impl Default for PointsTable {
    fn default() -> Self {
        let row = |winner_sets, loser_sets, winner_points, loser_points| OutcomePoints {
            winner_sets,
            loser_sets,
            winner_points,
            loser_points,
        };
        Self::new(vec![row(3, 0, 3, 0), row(3, 1, 3, 0), row(3, 2, 2, 1)])
    }
}

/// Thresholds used by the score rules plus the points table used by standings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub sets_to_win: u16,
    pub set_points_to_win: u16,
    pub set_min_margin: u16,
    pub fifth_set_points_to_win: u16,
    pub technical_defeat_sets_winner: u16,
    pub technical_defeat_sets_loser: u16,
    pub technical_defeat_set_winner: u16,
    pub technical_defeat_set_loser: u16,
    pub points: PointsTable,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            sets_to_win: SETS_COUNT_TO_WIN,
            set_points_to_win: SET_POINTS_MIN_VALUE_TO_WIN,
            set_min_margin: SET_POINTS_MIN_DELTA_TO_WIN,
            fifth_set_points_to_win: FIFTH_SET_POINTS_MIN_VALUE_TO_WIN,
            technical_defeat_sets_winner: TECHNICAL_DEFEAT_SETS_WINNER_SCORE,
            technical_defeat_sets_loser: TECHNICAL_DEFEAT_SETS_LOSER_SCORE,
            technical_defeat_set_winner: TECHNICAL_DEFEAT_SET_WINNER_SCORE,
            technical_defeat_set_loser: TECHNICAL_DEFEAT_SET_LOSER_SCORE,
            points: PointsTable::default(),
        }
    }
}

/// Errors reading a scoring config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read scoring config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot parse scoring config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ScoringConfig {
    /// Load from a JSON file; missing fields fall back to the defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Points needed to take the set at `index` (0-based).
    pub fn set_points_to_win_at(&self, index: usize) -> u16 {
        if index == FIFTH_SET_INDEX {
            self.fifth_set_points_to_win
        } else {
            self.set_points_to_win
        }
    }
}
