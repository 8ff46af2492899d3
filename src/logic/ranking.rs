//! Ordering standings entries with a tie-break cascade.

use crate::config::ScoringConfig;
use crate::logic::standings::{aggregate, StandingsEntry};
use crate::models::{Game, GroupId, Team};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One key of the ranking cascade. Every key sorts better teams first.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankCriterion {
    Points,
    GamesWon,
    SetsRatio,
    BallsRatio,
}

/// Points, then games won, then sets ratio, then balls ratio.
pub const DEFAULT_CRITERIA: [RankCriterion; 4] = [
    RankCriterion::Points,
    RankCriterion::GamesWon,
    RankCriterion::SetsRatio,
    RankCriterion::BallsRatio,
];

impl RankCriterion {
    pub fn compare(self, a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
        match self {
            RankCriterion::Points => b.points.cmp(&a.points),
            RankCriterion::GamesWon => b.games_won.cmp(&a.games_won),
            RankCriterion::SetsRatio => b.sets_ratio().cmp(&a.sets_ratio()),
            RankCriterion::BallsRatio => b.balls_ratio().cmp(&a.balls_ratio()),
        }
    }
}

/// Rank with the default cascade. Full ties keep their input order.
pub fn rank(entries: Vec<StandingsEntry>) -> Vec<StandingsEntry> {
    rank_by(entries, &DEFAULT_CRITERIA)
}

/// Rank with a custom cascade; later criteria only break ties of earlier ones.
pub fn rank_by(mut entries: Vec<StandingsEntry>, criteria: &[RankCriterion]) -> Vec<StandingsEntry> {
    // sort_by is stable
    entries.sort_by(|a, b| {
        criteria
            .iter()
            .map(|c| c.compare(a, b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    entries
}

/// Aggregate and rank every group of a tournament.
pub fn compute_standings(
    games: &[Game],
    teams: &[Team],
    config: &ScoringConfig,
) -> BTreeMap<GroupId, Vec<StandingsEntry>> {
    aggregate(games, teams, config)
        .into_iter()
        .map(|(group, entries)| (group, rank(entries)))
        .collect()
}
