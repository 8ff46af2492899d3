//! Volleyball tournament organizer: result validation, scheduling rules,
//! standings and head-to-head tables.

pub mod config;
pub mod error;
pub mod export;
pub mod logic;
pub mod models;

pub use config::{OutcomePoints, PointsTable, ScoringConfig};
pub use error::{NotFound, PolicyViolation, ScheduleError, ScoreError, ValidationError};
pub use logic::{
    compute_pivot, compute_standings, generate_round_robin, rank, validate_game, GameChange,
    GameStore, MatchValidator, MemoryStore, PivotCell, PivotTable, RankCriterion, Ratio,
    ShortGameResult, StandingsEntry, TournamentSnapshot,
};
pub use models::{
    Game, GameId, GameResult, Group, GroupId, Penalty, Score, Side, Team, TeamId, Tournament,
    TournamentContext, TournamentError, TournamentId, TournamentScheme,
};
