//! Game: one scheduled match of a round (or a free day for a single team).

use crate::models::result::{GameResult, Side};
use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// A scheduled game. `away_team == None` is a free day (bye) for the home team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub tournament_id: TournamentId,
    /// Round number, starting at 1.
    pub round: u8,
    pub home_team: TeamId,
    pub away_team: Option<TeamId>,
    /// Start time, when already fixed.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// None until a result has been entered.
    #[serde(default)]
    pub result: Option<GameResult>,
}

impl Game {
    pub fn new(tournament_id: TournamentId, round: u8, home_team: TeamId, away_team: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            home_team,
            away_team: Some(away_team),
            date: None,
            result: None,
        }
    }

    /// A free day for `team` in `round`.
    pub fn free_day(tournament_id: TournamentId, round: u8, team: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            home_team: team,
            away_team: None,
            date: None,
            result: None,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_result(mut self, result: GameResult) -> Self {
        self.result = Some(result);
        self
    }

    pub fn is_free_day(&self) -> bool {
        self.away_team.is_none()
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home_team == team || self.away_team == Some(team)
    }

    pub fn team(&self, side: Side) -> Option<TeamId> {
        match side {
            Side::Home => Some(self.home_team),
            Side::Away => self.away_team,
        }
    }

    /// Both teams, home first; a free day yields only the home team.
    pub fn teams(&self) -> impl Iterator<Item = TeamId> + '_ {
        std::iter::once(self.home_team).chain(self.away_team)
    }

    /// Same two teams (or the same free day), regardless of home/away.
    pub fn same_pair(&self, other: &Game) -> bool {
        match (self.away_team, other.away_team) {
            (Some(a), Some(b)) => {
                (self.home_team == other.home_team && a == b)
                    || (self.home_team == b && a == other.home_team)
            }
            (None, None) => self.home_team == other.home_team,
            _ => false,
        }
    }

    /// Same home team and same away team.
    pub fn same_ordered_pair(&self, other: &Game) -> bool {
        self.home_team == other.home_team && self.away_team == other.away_team
    }

    /// A played result is one with at least one set entered.
    pub fn played_result(&self) -> Option<&GameResult> {
        self.result.as_ref().filter(|r| !r.has_no_sets_played())
    }

    /// Swap home and away, transposing any result. No-op for free days.
    pub fn swap_teams(&mut self) {
        if let Some(away) = self.away_team {
            self.away_team = Some(self.home_team);
            self.home_team = away;
            self.result = self.result.as_ref().map(GameResult::transpose);
        }
    }
}
