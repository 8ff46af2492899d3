//! Tournament, its scheme and the scheduling window.

use crate::models::game::Game;
use crate::models::team::{Group, GroupId, Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from editing tournament metadata (groups, teams).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Name was empty after trimming.
    #[error("Name must not be empty")]
    EmptyName,
    /// A group with this name already exists (case-insensitive).
    #[error("A group with this name already exists")]
    DuplicateGroupName,
    /// A team with this name already exists (case-insensitive).
    #[error("A team with this name already exists")]
    DuplicateTeamName,
    #[error("Group not found")]
    GroupNotFound(GroupId),
    #[error("Team not found")]
    TeamNotFound(TeamId),
    /// Teams that appear in a scheduled game cannot be removed.
    #[error("Team is already scheduled in a game")]
    TeamHasGames(TeamId),
    /// Games start must not be after games end.
    #[error("Games start {start} is after games end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// How many times each pair of teams meets.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentScheme {
    /// Every pair meets once.
    #[default]
    Single,
    /// Every pair meets twice, once at each home.
    Double,
    /// Two legs plus a third stage arranged by the organizer; pairings follow `Double`.
    DoubleAndHalf,
}

/// Everything the scheduling rules need to know about a tournament.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentContext {
    pub id: TournamentId,
    pub scheme: TournamentScheme,
    pub games_start: DateTime<Utc>,
    pub games_end: DateTime<Utc>,
}

impl TournamentContext {
    /// Inclusive on both ends.
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.games_start <= date && date <= self.games_end
    }
}

/// A tournament with its groups, teams and games.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub scheme: TournamentScheme,
    pub games_start: DateTime<Utc>,
    pub games_end: DateTime<Utc>,
    pub groups: Vec<Group>,
    pub teams: Vec<Team>,
    pub games: Vec<Game>,
}

impl Tournament {
    /// Create an empty tournament. Fails if the window is reversed.
    pub fn new(
        name: impl Into<String>,
        scheme: TournamentScheme,
        games_start: DateTime<Utc>,
        games_end: DateTime<Utc>,
    ) -> Result<Self, TournamentError> {
        if games_start > games_end {
            return Err(TournamentError::InvalidWindow {
                start: games_start,
                end: games_end,
            });
        }
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            scheme,
            games_start,
            games_end,
            groups: Vec::new(),
            teams: Vec::new(),
            games: Vec::new(),
        })
    }

    pub fn context(&self) -> TournamentContext {
        TournamentContext {
            id: self.id,
            scheme: self.scheme,
            games_start: self.games_start,
            games_end: self.games_end,
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Teams of one group, in insertion order.
    pub fn teams_in_group(&self, group_id: GroupId) -> Vec<Team> {
        self.teams
            .iter()
            .filter(|t| t.group_id == group_id)
            .cloned()
            .collect()
    }

    /// Games where every participating team belongs to `group_id`.
    pub fn games_in_group(&self, group_id: GroupId) -> Vec<Game> {
        self.games
            .iter()
            .filter(|g| {
                g.teams()
                    .all(|id| self.team(id).is_some_and(|t| t.group_id == group_id))
            })
            .cloned()
            .collect()
    }

    /// Add a group. Names are unique (case-insensitive).
    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        division: impl Into<String>,
    ) -> Result<GroupId, TournamentError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        let is_duplicate = self
            .groups
            .iter()
            .any(|g| g.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateGroupName);
        }
        let group = Group::new(name_trimmed, division);
        let id = group.id;
        self.groups.push(group);
        Ok(id)
    }

    /// Add a team to a group. Names are unique within the tournament (case-insensitive).
    pub fn add_team(
        &mut self,
        name: impl Into<String>,
        group_id: GroupId,
    ) -> Result<TeamId, TournamentError> {
        if self.group(group_id).is_none() {
            return Err(TournamentError::GroupNotFound(group_id));
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        let team = Team::new(name_trimmed, group_id);
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Move a team to another group (allowed until it has games).
    pub fn move_team(&mut self, team_id: TeamId, group_id: GroupId) -> Result<(), TournamentError> {
        if self.group(group_id).is_none() {
            return Err(TournamentError::GroupNotFound(group_id));
        }
        if self.games.iter().any(|g| g.involves(team_id)) {
            return Err(TournamentError::TeamHasGames(team_id));
        }
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        team.group_id = group_id;
        Ok(())
    }

    /// Remove a team that has not been scheduled yet.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        if self.games.iter().any(|g| g.involves(team_id)) {
            return Err(TournamentError::TeamHasGames(team_id));
        }
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        Ok(())
    }
}
