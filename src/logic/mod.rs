//! Tournament business logic: result validation, scheduling rules, standings.

pub mod match_validator;
pub mod pivot;
pub mod ranking;
pub mod schedule_generator;
pub mod schedule_rules;
pub mod score_rules;
pub mod standings;

pub use match_validator::{
    check_deletable, validate_game, GameChange, GameStore, MatchValidator, MemoryStore,
    TournamentSnapshot,
};
pub use pivot::{PivotCell, PivotTable, ShortGameResult};
pub use ranking::{compute_standings, rank, rank_by, RankCriterion, DEFAULT_CRITERIA};
pub use schedule_generator::generate_round_robin;
pub use standings::{aggregate, Ratio, StandingsEntry};

use crate::models::{Game, Team};

/// Head-to-head table of one group (`teams` give the row/column order).
pub fn compute_pivot(games_in_group: &[Game], teams_in_group: &[Team]) -> PivotTable {
    pivot::build(games_in_group, teams_in_group)
}
