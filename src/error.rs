//! Validation errors returned when a game or result is rejected.
//!
//! Every variant is a business-rule outcome meant to be shown to the user;
//! none of them signals a bug.

use crate::models::{GameId, TeamId, TournamentId};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// The result itself is malformed (`set` fields are 0-based indices).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ScoreError {
    #[error("Sets score {home}:{away} is not a valid final score (one side needs {sets_to_win} sets)")]
    SetsScoreInvalid { home: u16, away: u16, sets_to_win: u16 },
    #[error("Technical defeat must be recorded as {winner}:{loser} in sets")]
    TechnicalDefeatSetsScoreInvalid { winner: u16, loser: u16 },
    #[error("Sets score {home}:{away} does not match the set scores ({won_home}:{won_away})")]
    AggregateMismatch {
        home: u16,
        away: u16,
        won_home: u16,
        won_away: u16,
    },
    #[error("Set {} must be won with at least {min_points} points and a {min_margin} point lead", .set + 1)]
    RequiredSetInvalid {
        set: usize,
        min_points: u16,
        min_margin: u16,
    },
    #[error("Set {} must be unplayed or won with at least {min_points} points and a {min_margin} point lead", .set + 1)]
    OptionalSetInvalid {
        set: usize,
        min_points: u16,
        min_margin: u16,
    },
    #[error("Fifth set must be unplayed or won with at least {min_points} points and a {min_margin} point lead")]
    FifthSetInvalid { min_points: u16, min_margin: u16 },
    #[error("Set {} is a technical defeat and must be recorded as {winner}:{loser}", .set + 1)]
    TechnicalDefeatSetInvalid { set: usize, winner: u16, loser: u16 },
    #[error("Set {} is played after the match was already decided", .set + 1)]
    SetAfterMatchDecided { set: usize },
    #[error("Set {} is played after an unplayed set", .set + 1)]
    UnplayedSetsNotContiguous { set: usize },
}

/// The game conflicts with the schedule of its tournament.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ScheduleError {
    #[error("Round number must be positive")]
    InvalidRound,
    #[error("A team cannot play against itself")]
    SameTeam(TeamId),
    #[error("These teams already play each other in round {round}")]
    DuplicatePairInRound { round: u8 },
    #[error("Team already has a free day in round {round}")]
    DuplicateFreeDayInRound { round: u8, team: TeamId },
    #[error("Team is already playing another game in round {round}")]
    TeamBookedInRound { round: u8, team: TeamId },
    #[error("Team has a free day in round {round}")]
    TeamHasFreeDayInRound { round: u8, team: TeamId },
    #[error("These teams have already played each other in round {round}")]
    PairAlreadyPlayed { round: u8 },
    #[error("These teams have already played each other at both homes")]
    PairPlayedInBothOrders,
    #[error("Team already has a free day in round {round}")]
    FreeDayLimitExceeded { round: u8, team: TeamId },
    #[error("Game is already scheduled")]
    GameExists(GameId),
    #[error("A group of {teams} teams needs more than 255 rounds")]
    TooManyRounds { teams: usize },
}

/// Something the request refers to no longer exists.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum NotFound {
    #[error("Tournament not found")]
    Tournament(TournamentId),
    #[error("Game not found")]
    Game(GameId),
    #[error("Team not found")]
    Team(TeamId),
}

/// The request is well formed but not allowed in the game's current state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum PolicyViolation {
    #[error("Game already has a result")]
    GameAlreadyPlayed(GameId),
    #[error("Game date has already passed")]
    GameDatePassed(GameId),
}

/// Any reason a game create/update/delete was rejected.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("Game date {date} is outside the tournament window {start} - {end}")]
    OutsideWindow {
        date: DateTime<Utc>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error(transparent)]
    Policy(#[from] PolicyViolation),
}
